#![allow(dead_code)]

use page_interactions::{ControllerConfig, MountHandle, Page, Result};

pub const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Interactions</title>
  <style>.tab-content { display: none; } .tab-content.active { display: block; }</style>
</head>
<body>
  <!-- event handling -->
  <section id="events">
    <button id="click-btn" type="button">Click me</button>
    <p id="click-message"></p>
    <div id="hover-box">Hover over me!</div>
    <button id="reset-btn" type="button">Reset</button>
    <input id="keyboard-input" type="text" placeholder="Type here">
    <p id="mirror-text"></p>
  </section>

  <section id="toggles">
    <label><input id="dark-mode-toggle" type="checkbox"> Dark mode</label>
    <button id="decrement" type="button">-</button>
    <span id="counter">0</span>
    <button id="increment" type="button">+</button>
  </section>

  <section id="faq">
    <div class="faq-item" id="faq-1">
      <div class="faq-question">What is this? <span>+</span></div>
      <div class="faq-answer">A demo page.</div>
    </div>
    <div class="faq-item" id="faq-2">
      <div class="faq-question">Why build it? <span>+</span></div>
      <div class="faq-answer">To exercise events.</div>
    </div>
    <div class="faq-item" id="faq-3">
      <div class="faq-question">How does it work? <span>+</span></div>
      <div class="faq-answer">Listeners.</div>
    </div>
  </section>

  <section id="tabs">
    <div class="tab-bar">
      <button class="tab-btn active" id="tab-btn-1" data-tab="tab1" type="button">One</button>
      <button class="tab-btn" id="tab-btn-2" data-tab="tab2" type="button">Two</button>
      <button class="tab-btn" id="tab-btn-3" data-tab="tab3" type="button">Three</button>
    </div>
    <div class="tab-content active" id="tab1">First panel</div>
    <div class="tab-content" id="tab2">Second panel</div>
    <div class="tab-content" id="tab3">Third panel</div>
  </section>

  <form id="user-form">
    <input id="name" type="text" name="name">
    <p class="error" id="name-error">Name must be at least 2 characters</p>
    <input id="email" type="email" name="email">
    <p class="error" id="email-error">Please enter a valid email</p>
    <input id="password" type="password" name="password">
    <p class="error" id="password-error">Use 8+ characters with a letter and a digit</p>
    <input id="confirm-password" type="password" name="confirm">
    <p class="error" id="confirm-password-error">Passwords do not match</p>
    <button id="submit-btn" type="submit">Sign up</button>
  </form>
  <div id="form-success">Form submitted successfully!</div>

  <div id="draggableBox" draggable="true"><img id="dragImg" src="box.png" alt="box"></div>
  <div id="dropZone">Drop here</div>
</body>
</html>
"#;

pub fn page() -> Result<Page> {
    Page::from_html(PAGE_HTML)
}

pub fn mounted_page() -> Result<(Page, MountHandle)> {
    let mut page = page()?;
    let handle = page.mount(ControllerConfig::default())?;
    Ok((page, handle))
}

/// The same page with `needle` cut out of the markup.
pub fn page_without(needle: &str) -> Result<Page> {
    assert!(PAGE_HTML.contains(needle), "fixture has no {needle:?}");
    Page::from_html(&PAGE_HTML.replacen(needle, "", 1))
}

pub fn fill_form(page: &mut Page, name: &str, email: &str, password: &str, confirm: &str) -> Result<()> {
    page.type_text("#name", name)?;
    page.type_text("#email", email)?;
    page.type_text("#password", password)?;
    page.type_text("#confirm-password", confirm)?;
    Ok(())
}
