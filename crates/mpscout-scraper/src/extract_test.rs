use super::*;

fn base() -> Url {
    Url::parse("https://web.facebook.com").unwrap()
}

fn candidate(lines: &[&str], href: Option<&str>) -> RawCandidate {
    RawCandidate {
        lines: lines.iter().map(|l| (*l).to_string()).collect(),
        text: lines.concat(),
        href: href.map(str::to_owned),
    }
}

const RESULTS_PAGE: &str = r#"
<html>
  <body>
    <div role="main">
      <a href="/item/1">
        <div><span>$45</span></div>
        <div><span>Blue Bicycle</span></div>
        <div><span>Springfield</span></div>
      </a>
      <a href="/item/2">
        <span>$20</span><span>Desk Lamp</span><span>Shelbyville</span>
      </a>
    </div>
  </body>
</html>
"#;

// ---------------------------------------------------------------------------
// extract_candidates
// ---------------------------------------------------------------------------

#[test]
fn extracts_every_anchor_in_document_order() {
    let extraction = extract_candidates(RESULTS_PAGE);

    assert_eq!(extraction.total_links, 2);
    assert_eq!(extraction.candidates.len(), 2);
    assert_eq!(
        extraction.candidates[0].lines,
        vec!["$45", "Blue Bicycle", "Springfield"]
    );
    assert_eq!(extraction.candidates[0].href.as_deref(), Some("/item/1"));
    assert_eq!(
        extraction.candidates[1].lines,
        vec!["$20", "Desk Lamp", "Shelbyville"]
    );
}

#[test]
fn candidate_text_is_concatenated_without_separators() {
    let extraction = extract_candidates(RESULTS_PAGE);
    let text = &extraction.candidates[1].text;
    assert!(text.contains("$20Desk LampShelbyville"), "got: {text:?}");
}

#[test]
fn empty_markup_has_no_candidates() {
    let extraction = extract_candidates("");
    assert_eq!(extraction.total_links, 0);
    assert!(extraction.candidates.is_empty());
}

#[test]
fn anchors_without_text_or_href_are_still_counted() {
    let extraction = extract_candidates(r#"<a></a><a href="/x"> </a>"#);
    assert_eq!(extraction.total_links, 2);
    assert!(extraction.candidates[0].lines.is_empty());
    assert!(extraction.candidates[0].href.is_none());
    assert!(extraction.candidates[1].lines.is_empty());
}

#[test]
fn multi_line_text_nodes_are_split_and_trimmed() {
    let extraction = extract_candidates("<a href=\"/i\">  $10\n\n   Chair  \n Springfield </a>");
    assert_eq!(
        extraction.candidates[0].lines,
        vec!["$10", "Chair", "Springfield"]
    );
}

#[test]
fn nested_anchor_text_includes_descendants() {
    let extraction =
        extract_candidates(r#"<a href="/i"><b>Bold</b> and <i>italic</i></a>"#);
    assert_eq!(extraction.candidates[0].lines, vec!["Bold", "and", "italic"]);
    assert_eq!(extraction.candidates[0].text, "Bold and italic");
}

#[test]
fn extraction_is_idempotent() {
    assert_eq!(extract_candidates(RESULTS_PAGE), extract_candidates(RESULTS_PAGE));
}

// ---------------------------------------------------------------------------
// decompose
// ---------------------------------------------------------------------------

#[test]
fn decomposes_standard_card() {
    let record = decompose(
        &candidate(&["$45", "Blue Bicycle", "Springfield"], Some("/item/1")),
        &base(),
    );
    assert_eq!(record.title, "Blue Bicycle");
    assert_eq!(record.price, Some(45.0));
    assert_eq!(record.location, "Springfield");
    assert_eq!(record.url, "https://web.facebook.com/item/1");
}

#[test]
fn single_line_has_empty_title() {
    let record = decompose(&candidate(&["Springfield"], Some("/i")), &base());
    assert_eq!(record.title, "");
    assert_eq!(record.location, "Springfield");
    assert_eq!(record.price, None);
}

#[test]
fn no_lines_has_empty_title_and_location() {
    let record = decompose(&candidate(&[], Some("/i")), &base());
    assert_eq!(record.title, "");
    assert_eq!(record.location, "");
    assert_eq!(record.price, None);
}

#[test]
fn free_listing_has_no_price() {
    let record = decompose(
        &candidate(&["Free", "Old Couch", "Springfield"], Some("/i")),
        &base(),
    );
    assert_eq!(record.price, None);
    assert_eq!(record.title, "Old Couch");
}

#[test]
fn two_line_card_uses_first_line_as_title() {
    let record = decompose(&candidate(&["Desk", "Springfield"], None), &base());
    assert_eq!(record.title, "Desk");
    assert_eq!(record.location, "Springfield");
}

// ---------------------------------------------------------------------------
// resolve_listing_url
// ---------------------------------------------------------------------------

#[test]
fn root_relative_href_is_joined_to_base() {
    assert_eq!(
        resolve_listing_url(&base(), Some("/marketplace/item/42/?ref=search")),
        "https://web.facebook.com/marketplace/item/42/?ref=search"
    );
}

#[test]
fn absolute_href_is_not_prefixed_twice() {
    assert_eq!(
        resolve_listing_url(&base(), Some("https://www.facebook.com/marketplace/item/42/")),
        "https://www.facebook.com/marketplace/item/42/"
    );
}

#[test]
fn relative_href_without_slash_is_joined() {
    assert_eq!(
        resolve_listing_url(&base(), Some("item/7")),
        "https://web.facebook.com/item/7"
    );
}

#[test]
fn missing_href_resolves_to_base() {
    assert_eq!(resolve_listing_url(&base(), None), "https://web.facebook.com/");
}
