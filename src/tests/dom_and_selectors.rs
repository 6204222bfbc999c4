use super::*;
use crate::dom::Dom;
use crate::html::parse_html;

fn dom(html: &str) -> Result<Dom> {
    parse_html(html)
}

fn id(dom: &Dom, id: &str) -> Result<NodeId> {
    dom.by_id(id)
        .ok_or_else(|| Error::SelectorNotFound(format!("#{id}")))
}

#[test]
fn selector_subset_matches_tags_ids_classes_and_attributes() -> Result<()> {
    let dom = dom(r#"
        <ul id="list">
          <li class="item first" data-kind="a">one</li>
          <li class="item" data-kind="b">two</li>
          <li class="other">three</li>
        </ul>
        <p class="item">outside</p>
        "#)?;

    assert_eq!(dom.query_selector_all("li")?.len(), 3);
    assert_eq!(dom.query_selector_all("li.item")?.len(), 2);
    assert_eq!(dom.query_selector_all(".item.first")?.len(), 1);
    assert_eq!(dom.query_selector_all("[data-kind]")?.len(), 2);
    assert_eq!(dom.query_selector_all("[data-kind=b]")?.len(), 1);
    assert_eq!(dom.query_selector_all("#list > .item")?.len(), 2);
    assert_eq!(dom.query_selector_all("#list .item, p.item")?.len(), 3);
    assert_eq!(dom.query_selector_all("*")?.len(), 5);
    Ok(())
}

#[test]
fn child_combinator_requires_direct_parent() -> Result<()> {
    let dom = dom(r#"<div id="outer"><section><span class="deep">x</span></section></div>"#)?;
    assert_eq!(dom.query_selector_all("#outer .deep")?.len(), 1);
    assert!(dom.query_selector_all("#outer > .deep")?.is_empty());
    assert_eq!(dom.query_selector_all("section > span")?.len(), 1);
    Ok(())
}

#[test]
fn unsupported_selector_syntax_is_rejected() -> Result<()> {
    let dom = dom("<p id='a'>x</p>")?;
    for selector in ["p:hover", "p + p", "p ~ p", ""] {
        match dom.query_selector_all(selector) {
            Err(Error::UnsupportedSelector(_)) => {}
            other => panic!("expected unsupported selector for {selector:?}, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn scoped_query_only_searches_descendants() -> Result<()> {
    let dom = dom(r#"
        <div class="faq-item" id="one"><div class="faq-question">Q <span>+</span></div></div>
        <div class="faq-item" id="two"><div class="faq-question">Q <span>+</span></div></div>
        "#)?;
    let two = id(&dom, "two")?;
    let question = dom.query_selector_from(two, ".faq-question")?;
    assert!(question.is_some_and(|node| dom.parent(node) == Some(two)));
    assert!(dom.query_selector_from(two, ".faq-item")?.is_none());
    Ok(())
}

#[test]
fn style_set_writes_removes_and_preserves_other_declarations() -> Result<()> {
    let mut dom = dom(r#"<div id="box" style="margin: 0; color: red"></div>"#)?;
    let node = id(&dom, "box")?;

    dom.style_set(node, "backgroundColor", "blue")?;
    assert_eq!(dom.style_get(node, "background-color")?, "blue");
    assert_eq!(dom.style_get(node, "color")?, "red");

    dom.style_set(node, "color", "")?;
    assert_eq!(dom.style_get(node, "color")?, "");
    assert_eq!(
        dom.attr(node, "style").as_deref(),
        Some("margin: 0; background-color: blue;")
    );

    dom.style_set(node, "margin", "")?;
    dom.style_set(node, "background-color", "")?;
    assert_eq!(dom.attr(node, "style"), None);
    Ok(())
}

#[test]
fn class_set_adds_once_and_removes_cleanly() -> Result<()> {
    let mut dom = dom(r#"<div id="tab" class="tab-btn"></div>"#)?;
    let node = id(&dom, "tab")?;

    dom.class_set(node, "active", true)?;
    dom.class_set(node, "active", true)?;
    assert_eq!(dom.attr(node, "class").as_deref(), Some("tab-btn active"));

    dom.class_set(node, "active", false)?;
    assert!(!dom.class_contains(node, "active")?);
    dom.class_remove(node, "tab-btn")?;
    assert_eq!(dom.attr(node, "class"), None);
    Ok(())
}

#[test]
fn append_child_relocates_and_rejects_cycles() -> Result<()> {
    let mut dom = dom(
        r#"<div id="source"><img id="img"></div><div id="target"><p id="inner">text</p></div>"#,
    )?;
    let source = id(&dom, "source")?;
    let target = id(&dom, "target")?;
    let inner = id(&dom, "inner")?;
    let img = id(&dom, "img")?;

    match dom.append_child(inner, target) {
        Err(Error::Runtime(msg)) => assert!(msg.contains("cycle")),
        other => panic!("appending an ancestor must fail: {other:?}"),
    }
    match dom.append_child(target, dom.root) {
        Err(Error::Runtime(_)) => {}
        other => panic!("appending the document must fail: {other:?}"),
    }

    dom.clear_children(target)?;
    dom.append_child(target, img)?;
    assert_eq!(dom.children(target), &[img]);
    assert!(dom.children(source).is_empty());
    assert_eq!(dom.by_id("img"), Some(img));
    assert_eq!(dom.by_id("inner"), None);
    Ok(())
}

#[test]
fn detached_nodes_leave_the_id_index() -> Result<()> {
    let mut dom = dom(r#"<div id="zone"><span id="inner">x</span></div>"#)?;
    let zone = id(&dom, "zone")?;
    dom.set_text_content(zone, "Dropped!")?;
    assert_eq!(dom.by_id("inner"), None);
    assert_eq!(dom.text_content(zone), "Dropped!");
    Ok(())
}

#[test]
fn first_duplicate_id_wins() -> Result<()> {
    let dom = dom(r#"<p id="dup">first</p><p id="dup">second</p>"#)?;
    let node = id(&dom, "dup")?;
    assert_eq!(dom.text_content(node), "first");
    Ok(())
}

#[test]
fn dataset_reads_data_attributes() -> Result<()> {
    let dom = dom(r#"<button id="b" data-tab="tab2" data-panel-name="p"></button>"#)?;
    let node = id(&dom, "b")?;
    assert_eq!(dom.dataset_get(node, "tab").as_deref(), Some("tab2"));
    assert_eq!(dom.dataset_get(node, "panelName").as_deref(), Some("p"));
    assert_eq!(dom.dataset_get(node, "missing"), None);
    Ok(())
}

#[test]
fn body_falls_back_to_first_element() -> Result<()> {
    let with_body = dom("<html><body id='b'><p>x</p></body></html>")?;
    assert_eq!(with_body.body(), with_body.by_id("b"));

    let fragment = dom("<main id='m'><p>x</p></main>")?;
    assert_eq!(fragment.body(), fragment.by_id("m"));
    Ok(())
}
