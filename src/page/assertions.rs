use super::Page;
use crate::dom::NodeId;
use crate::events::EventKind;
use crate::{Error, Result};

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.checked(target)?;
        self.check(selector, target, &expected.to_string(), actual.to_string())
    }

    /// Asserts presence (`expected = true`) or absence of `class_name`.
    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let present = self.dom.class_contains(target, class_name)?;
        let describe = |present: bool| {
            if present {
                format!("class {class_name}")
            } else {
                format!("no class {class_name}")
            }
        };
        self.check(selector, target, &describe(expected), describe(present))
    }

    /// Compares one inline style declaration. An absent declaration reads as "".
    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.class_contains(target, class_name)
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn node(&self, selector: &str) -> Result<NodeId> {
        self.select_one(selector)
    }

    /// Direct children of the first match, text nodes included.
    pub fn children(&self, selector: &str) -> Result<Vec<NodeId>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.children(target).to_vec())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    /// Listeners of `event` registered directly on the first match, across all mounts.
    pub fn listener_count(&self, selector: &str, event: EventKind) -> Result<usize> {
        let target = self.select_one(selector)?;
        Ok(self.listeners.count_for(target, event))
    }

    pub fn total_listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: String) -> Result<()> {
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }
}
