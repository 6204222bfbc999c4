use super::*;
use crate::html::parse_html;

#[test]
fn comments_and_doctype_are_skipped() -> Result<()> {
    let dom = parse_html("<!DOCTYPE html><!-- header --><p id=\"p\">a<!-- x -->b</p>")?;
    let p = dom.query_selector("#p")?.ok_or_else(|| Error::SelectorNotFound("#p".into()))?;
    assert_eq!(dom.text_content(p), "ab");
    assert_eq!(dom.all_element_nodes().len(), 1);
    Ok(())
}

#[test]
fn boolean_unquoted_and_duplicate_attributes() -> Result<()> {
    let dom = parse_html(
        r#"<input id=box type=checkbox checked disabled data-x='1' data-x="2">"#,
    )?;
    let input = dom.by_id("box").ok_or_else(|| Error::SelectorNotFound("#box".into()))?;
    assert_eq!(dom.attr(input, "type").as_deref(), Some("checkbox"));
    assert_eq!(dom.attr(input, "checked").as_deref(), Some(""));
    assert_eq!(dom.attr(input, "data-x").as_deref(), Some("1"));
    assert!(dom.checked(input)?);
    assert!(dom.disabled(input));
    assert!(!dom.readonly(input));
    Ok(())
}

#[test]
fn void_and_self_closing_tags_do_not_swallow_siblings() -> Result<()> {
    let dom = parse_html(r#"<div id="d"><img id="i" src="a.png"><br><span id="s"/>tail</div>"#)?;
    let div = dom.by_id("d").ok_or_else(|| Error::SelectorNotFound("#d".into()))?;
    let img = dom.by_id("i").ok_or_else(|| Error::SelectorNotFound("#i".into()))?;
    assert_eq!(dom.parent(img), Some(div));
    assert!(dom.children(img).is_empty());
    assert_eq!(dom.children(div).len(), 4);
    assert_eq!(dom.text_content(div), "tail");
    Ok(())
}

#[test]
fn character_references_are_decoded_in_text_and_attributes() -> Result<()> {
    let dom = parse_html(r#"<p id="p" title="a &amp; b">&lt;x&gt; &#65;&#x42; &unknown;</p>"#)?;
    let p = dom.by_id("p").ok_or_else(|| Error::SelectorNotFound("#p".into()))?;
    assert_eq!(dom.attr(p, "title").as_deref(), Some("a & b"));
    assert_eq!(dom.text_content(p), "<x> AB &unknown;");
    Ok(())
}

#[test]
fn script_and_style_bodies_stay_raw_text() -> Result<()> {
    let dom = parse_html(
        "<script id=\"s\">if (a < b) { x('<p>'); }</script><STYLE id=\"c\">p > a {}</STYLE><p id=\"after\"></p>",
    )?;
    let script = dom.by_id("s").ok_or_else(|| Error::SelectorNotFound("#s".into()))?;
    let style = dom.by_id("c").ok_or_else(|| Error::SelectorNotFound("#c".into()))?;
    assert_eq!(dom.text_content(script), "if (a < b) { x('<p>'); }");
    assert_eq!(dom.text_content(style), "p > a {}");
    assert_eq!(dom.query_selector_all("p")?.len(), 1);
    Ok(())
}

#[test]
fn form_controls_pick_up_values_from_markup() -> Result<()> {
    let dom = parse_html(
        r#"<input id="i" value="start"><textarea id="t">notes here</textarea><input id="plain">"#,
    )?;
    let input = dom.by_id("i").ok_or_else(|| Error::SelectorNotFound("#i".into()))?;
    let area = dom.by_id("t").ok_or_else(|| Error::SelectorNotFound("#t".into()))?;
    let plain = dom.by_id("plain").ok_or_else(|| Error::SelectorNotFound("#plain".into()))?;
    assert_eq!(dom.value(input)?, "start");
    assert_eq!(dom.value(area)?, "notes here");
    assert_eq!(dom.value(plain)?, "");
    Ok(())
}

#[test]
fn stray_end_tags_are_ignored() -> Result<()> {
    let dom = parse_html(r#"<div id="d"></span><p id="p">x</p></div>"#)?;
    let div = dom.by_id("d").ok_or_else(|| Error::SelectorNotFound("#d".into()))?;
    let p = dom.by_id("p").ok_or_else(|| Error::SelectorNotFound("#p".into()))?;
    assert_eq!(dom.parent(p), Some(div));
    Ok(())
}

#[test]
fn malformed_markup_is_rejected() {
    for html in [
        "<p>text<!-- never closed",
        "<div class=\"open>",
        "<script>let a = 1;",
        "<div",
    ] {
        match parse_html(html) {
            Err(Error::HtmlParse(_)) => {}
            other => panic!("expected HtmlParse for {html:?}, got {other:?}"),
        }
    }
}
