use edgetone::{
    find_dominant_color, find_dominant_colors_with, CropSpec, DominantColors, Edge, Error, HistogramKind,
    HistogramSource, Options, Result, Rgb,
};
use std::{path::Path, sync::Mutex};

/// Serves canned histogram text per edge and band, and remembers what it was asked for.
#[derive(Default)]
struct StubSource {
    top_full: String,
    top_border: String,
    bottom_full: String,
    bottom_border: String,
    fail_on: Option<(Edge, HistogramKind)>,
    requests: Mutex<Vec<CropSpec>>,
}

impl HistogramSource for StubSource {
    fn fetch_histogram(&self, _: &Path, crop: &CropSpec) -> Result<String> {
        self.requests.lock().unwrap().push(*crop);

        if self.fail_on == Some((crop.edge, crop.kind)) {
            return Err(Error::engine("convert: no decode delegate for this image format"));
        }

        Ok(match (crop.edge, crop.kind) {
            (Edge::Top, HistogramKind::Full) => self.top_full.clone(),
            (Edge::Top, HistogramKind::Border) => self.top_border.clone(),
            (Edge::Bottom, HistogramKind::Full) => self.bottom_full.clone(),
            (Edge::Bottom, HistogramKind::Border) => self.bottom_border.clone(),
        })
    }
}

fn stub() -> StubSource {
    StubSource {
        // the two greys are 14 apart and merge into 500 + 300
        top_full: "       500: (200, 30, 30) #C81E1E srgb(200,30,30)\n\
                   \x20      350: (100,100,100) #646464 grey39\n\
                   \x20      300: (115,115,115) #737373 grey45\n"
            .to_owned(),
        top_border: "       950: (250,250,250) #FAFAFA srgb(250,250,250)\n\
                     \x20       50: (  0,  0,  0) #000000 black\n"
            .to_owned(),
        bottom_full: "      4000: ( 10, 20, 30,255) #0A141E srgba(10,20,30,1)\n\
                      \x20     500: (250,250,250,255) #FAFAFA srgba(250,250,250,1)\n"
            .to_owned(),
        bottom_border: "       550: (250,250,250) #FAFAFA srgb(250,250,250)\n\
                        \x20      450: (  0,  0,  0) #000000 black\n"
            .to_owned(),
        ..Default::default()
    }
}

#[test]
fn picks_border_or_full_per_edge() {
    let colors = find_dominant_colors_with(&stub(), "photo.jpg", &Options::default()).unwrap();

    assert_eq!(
        colors,
        DominantColors {
            top: Rgb::new(250, 250, 250),
            bottom: Rgb::new(10, 20, 30),
        }
    );
}

#[test]
fn merged_colors_can_overtake_the_first_entry() {
    let source = stub();
    let color = find_dominant_color(&source, Path::new("photo.jpg"), Edge::Top, &Options::default());

    // the top border is dominant, so look at the full band directly
    let full = edgetone::Histogram::parse(&source.top_full).optimize(22.0);
    assert_eq!(color.unwrap(), Rgb::new(250, 250, 250));
    assert_eq!(full.most_prominent_color(), Some(Rgb::new(100, 100, 100)));
    assert_eq!(full.swatches()[0].population(), 650);
}

#[test]
fn requests_four_histograms() {
    let source = stub();
    find_dominant_colors_with(&source, "photo.jpg", &Options::default().resize_width(1000)).unwrap();

    let mut requests = source.requests.into_inner().unwrap();
    requests.sort_by_key(|crop| (crop.edge == Edge::Bottom, crop.kind == HistogramKind::Border));

    let summary = requests
        .iter()
        .map(|crop| (crop.edge, crop.kind, crop.resize_width, crop.crop_height, crop.colors))
        .collect::<Vec<_>>();

    assert_eq!(
        summary,
        vec![
            (Edge::Top, HistogramKind::Full, 1000, 50, 256),
            (Edge::Top, HistogramKind::Border, 1000, 15, 16),
            (Edge::Bottom, HistogramKind::Full, 1000, 50, 256),
            (Edge::Bottom, HistogramKind::Border, 1000, 15, 16),
        ]
    );
}

#[test]
fn one_failed_histogram_fails_everything() {
    let source = StubSource {
        fail_on: Some((Edge::Bottom, HistogramKind::Border)),
        ..stub()
    };

    let result = find_dominant_colors_with(&source, "photo.jpg", &Options::default());

    assert!(matches!(result, Err(Error::Engine { .. })));
}

#[test]
fn unparseable_output_is_an_empty_histogram() {
    let source = StubSource {
        bottom_full: "convert: unable to open image\n".to_owned(),
        ..stub()
    };

    let result = find_dominant_colors_with(&source, "photo.jpg", &Options::default());

    assert!(matches!(
        result,
        Err(Error::EmptyHistogram {
            edge: Edge::Bottom,
            kind: HistogramKind::Full
        })
    ));
}

#[test]
fn invalid_options_fail_before_any_request() {
    let source = stub();
    let result = find_dominant_colors_with(&source, "photo.jpg", &Options::default().crop_height(0));

    assert!(matches!(result, Err(Error::InvalidOption { name: "crop_height", .. })));
    assert!(source.requests.into_inner().unwrap().is_empty());
}

#[test]
fn lower_threshold_merges_less() {
    let source = StubSource {
        top_border: "600: (0,0,0) #000000 black\n400: (10,10,10) #0A0A0A grey4\n".to_owned(),
        top_full: "100: (200,30,30) #C81E1E\n60: (100,100,100) #646464\n60: (115,115,115) #737373\n".to_owned(),
        ..stub()
    };

    let merged = find_dominant_colors_with(&source, "photo.jpg", &Options::default()).unwrap();
    assert_eq!(merged.top, Rgb::new(0, 0, 0));

    // with nothing merged the border is split 60/40 and no longer dominant, and the greys stay apart
    let unmerged =
        find_dominant_colors_with(&source, "photo.jpg", &Options::default().color_distance_threshold(0.0)).unwrap();
    assert_eq!(unmerged.top, Rgb::new(200, 30, 30));
}
