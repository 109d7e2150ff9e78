// HTML reconciliation tests

use altgen::cache::CaptionRecord;
use altgen::reconcile;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[test]
fn test_gallery_scenario_annotates_first_and_reports_unmatched() {
    let snapshot = vec![
        CaptionRecord::new("image1.jpg", "This is image one."),
        CaptionRecord::new("unmatched.png", "Something else."),
    ];
    let document = "<img src='/images/image1.jpg'><img src='image2.png'>";

    let (annotated, report) = reconcile::apply(document, &snapshot).unwrap();

    assert!(annotated.contains(r#"alt="This is image one.""#));
    // The second element matched nothing and passes through untouched.
    assert!(annotated.contains("<img src='image2.png'>"));
    assert_eq!(
        report.unmatched,
        BTreeSet::from(["unmatched.png".to_string()])
    );
}

#[test]
fn test_apply_is_idempotent() {
    let snapshot = vec![
        CaptionRecord::new("cat.jpg", "A cat sleeping on a mat."),
        CaptionRecord::new("dog.png", "A dog."),
    ];
    let document =
        r#"<p>pets</p><img src="/pets/cat.jpg"><img src="dog.png" alt="stale text">"#;

    let (once, first_report) = reconcile::apply(document, &snapshot).unwrap();
    let (twice, second_report) = reconcile::apply(&once, &snapshot).unwrap();

    assert_eq!(once, twice);
    assert_eq!(first_report, second_report);
}

#[test]
fn test_elements_without_src_are_skipped() {
    let snapshot = vec![CaptionRecord::new("cat.jpg", "A cat.")];
    let document = r#"<img width="100"><img src="cat.jpg">"#;

    let (annotated, report) = reconcile::apply(document, &snapshot).unwrap();

    assert!(annotated.starts_with(r#"<img width="100">"#));
    assert!(annotated.contains(r#"alt="A cat.""#));
    assert!(report.unmatched.is_empty());
}

#[test]
fn test_filename_can_match_multiple_elements() {
    let snapshot = vec![CaptionRecord::new("cat.jpg", "A cat.")];
    let document = r#"<img src="/a/cat.jpg"><img src="/b/cat.jpg">"#;

    let (annotated, report) = reconcile::apply(document, &snapshot).unwrap();

    assert_eq!(annotated.matches(r#"alt="A cat.""#).count(), 2);
    assert!(report.unmatched.is_empty());
}

#[test]
fn test_surrounding_markup_passes_through() {
    let snapshot = vec![CaptionRecord::new("cat.jpg", "A cat.")];
    let document = "<html><body><h1>Gallery</h1><a href='x'>link</a></body></html>";

    let (annotated, report) = reconcile::apply(document, &snapshot).unwrap();

    assert_eq!(annotated, document);
    assert_eq!(report.unmatched.len(), 1);
}

#[test]
fn test_existing_alt_is_overwritten_not_duplicated() {
    let snapshot = vec![CaptionRecord::new("cat.jpg", "A cat.")];
    let document = r#"<img src="cat.jpg" alt="an old description">"#;

    let (annotated, _) = reconcile::apply(document, &snapshot).unwrap();

    assert_eq!(annotated, r#"<img src="cat.jpg" alt="A cat.">"#);
}

proptest! {
    // Re-running reconciliation over its own output must not change the
    // document or the match report.
    #[test]
    fn prop_second_pass_is_a_fixed_point(
        entries in proptest::collection::vec(("[a-z]{3,8}", "[A-Za-z0-9 ,.]{0,40}"), 1..5),
        with_alt in any::<bool>(),
    ) {
        let snapshot: Vec<CaptionRecord> = entries
            .iter()
            .enumerate()
            .map(|(i, (stem, caption))| {
                CaptionRecord::new(format!("{stem}{i}.png"), caption.clone())
            })
            .collect();
        let document: String = snapshot
            .iter()
            .map(|r| {
                if with_alt {
                    format!(r#"<img src="/static/{}" alt="placeholder">"#, r.filename)
                } else {
                    format!(r#"<img src="/static/{}">"#, r.filename)
                }
            })
            .collect();

        let (once, report_once) = reconcile::apply(&document, &snapshot).unwrap();
        let (twice, report_twice) = reconcile::apply(&once, &snapshot).unwrap();

        prop_assert_eq!(once, twice);
        prop_assert_eq!(report_once, report_twice);
    }
}
