// tests/gateway.rs
//
// Print-view page reduction on hand-written page fragments. No network.
use verse_scrape::source::gateway::parse_passages;

const ROMANS_16: &str = r##"<!DOCTYPE html>
<html><head>
<script>var tpl = "<div class='passage-content'>";</script>
<style>.versenum { color: red }</style>
</head><body>
<div class="passage-text"><div class="passage-content passage-class-0">
<h3><span class="text Rom-16-23">Greetings</span></h3>
<p><span class="text Rom-16-23"><sup class="versenum">23&nbsp;</sup>Gaius my host<sup class="crossreference" data-cr="#cen-ASV-1A">(<a href="#cen-ASV-1A">A</a>)</sup>, saluteth you.</span>
<span class="text Rom-16-25"><sup class="versenum">25&nbsp;</sup>Now to him that is able<sup class="footnote">[<a href="#fen-ASV-1a">a</a>]</sup> to establish you</span></p>
<div class="footnotes"><h4>Footnotes</h4><ol><li>Romans 16:25 Or, <i>gospel</i></li></ol></div>
</div></div>
</body></html>"##;

#[test]
fn numbered_passages_in_page_order() {
    let got = parse_passages(ROMANS_16, "ASV", true).unwrap();
    assert_eq!(got, vec![
        "²³ Gaius my host, saluteth you.\n".to_string(),
        "²⁵ Now to him that is able to establish you".to_string(),
    ]);
}

#[test]
fn hidden_numbers() {
    let got = parse_passages(ROMANS_16, "ASV", false).unwrap();
    assert_eq!(got, vec![
        "Gaius my host, saluteth you.\n".to_string(),
        "Now to him that is able to establish you".to_string(),
    ]);
}

#[test]
fn chapter_number_opens_first_passage() {
    let page = r##"<div class="passage-content"><p><span class="text Rom-16-1"><span class="chapternum">16&nbsp;</span>I commend unto you Phoebe</span> <span class="text Rom-16-2"><sup class="versenum">2&nbsp;</sup>that ye receive her</span></p></div>"##;
    let got = parse_passages(page, "ASV", true).unwrap();
    assert_eq!(got, vec!["I commend unto you Phoebe ".to_string(), "² that ye receive her".to_string()]);
}

#[test]
fn markers_and_brackets_are_dropped() {
    let page = r##"<div class="passage-content"><p><sup class="versenum">9&nbsp;</sup>¶ [[Now]] the *second ⌞day⌟</p><br/></div>"##;
    let got = parse_passages(page, "NASB", true).unwrap();
    assert_eq!(got, vec!["⁹ Now the second day".to_string()]);
}

#[test]
fn geneva_first_lines_are_removed() {
    let page = r##"<div class="passage-content"><p class="first-line-none">The argument.</p><p><sup class="versenum">1&nbsp;</sup>In the beginning</p></div>"##;
    assert_eq!(parse_passages(page, "GNV", true).unwrap(), vec!["¹ In the beginning".to_string()]);

    let kept = parse_passages(page, "KJV", true).unwrap();
    assert_eq!(kept[0], "The argument.\n");
}

#[test]
fn page_without_passages() {
    let page = r##"<html><body><div class="search-result">No results found.</div></body></html>"##;
    assert_eq!(parse_passages(page, "NIV", true), None);

    let empty = r##"<div class="passage-content"><h3>Heading only</h3></div>"##;
    assert_eq!(parse_passages(empty, "NIV", true), Some(Vec::new()));
}
