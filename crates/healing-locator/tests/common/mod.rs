//! In-memory page used by the integration tests. It understands the compound
//! selectors the locator produces: `tag`, `#id`, `.class`, `[attr="value"]`
//! and `:contains("text")`, with CSS backslash escapes.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use healing_locator::{
    BoundingBox, DiagnosticsPort, ElementHandle, ElementSnapshot, ElementState, LocatorError,
    PageError, PagePort, SnapshotStore, StoreError,
};
use parking_lot::Mutex;

#[derive(Clone, Debug)]
pub struct FakeElement {
    pub handle: String,
    pub tag: String,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub bounding_box: BoundingBox,
}

impl FakeElement {
    pub fn new(handle: &str, tag: &str) -> Self {
        Self {
            handle: handle.to_string(),
            tag: tag.to_string(),
            text: String::new(),
            attributes: BTreeMap::new(),
            bounding_box: BoundingBox::default(),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = BoundingBox::new(x, y, width, height);
        self
    }
}

#[derive(Default)]
pub struct FakePage {
    elements: Mutex<Vec<FakeElement>>,
    queries: Mutex<Vec<String>>,
    fail_with: Mutex<Option<PageError>>,
}

impl FakePage {
    pub fn new(elements: Vec<FakeElement>) -> Arc<Self> {
        Arc::new(Self {
            elements: Mutex::new(elements),
            ..Default::default()
        })
    }

    pub fn update(&self, handle: &str, change: impl FnOnce(&mut FakeElement)) {
        let mut elements = self.elements.lock();
        if let Some(element) = elements.iter_mut().find(|e| e.handle == handle) {
            change(element);
        }
    }

    pub fn insert(&self, element: FakeElement) {
        self.elements.lock().push(element);
    }

    pub fn remove(&self, handle: &str) {
        self.elements.lock().retain(|e| e.handle != handle);
    }

    pub fn fail_queries(&self, err: PageError) {
        *self.fail_with.lock() = Some(err);
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    pub fn clear_queries(&self) {
        self.queries.lock().clear();
    }
}

#[async_trait]
impl PagePort for FakePage {
    async fn find(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError> {
        self.queries.lock().push(selector.to_string());
        if let Some(err) = self.fail_with.lock().clone() {
            return Err(err);
        }
        let compound = parse(selector).ok_or_else(|| PageError::Query {
            selector: selector.to_string(),
            reason: "unsupported selector".to_string(),
        })?;
        Ok(self
            .elements
            .lock()
            .iter()
            .filter(|element| compound.matches(element))
            .map(|element| ElementHandle::new(element.handle.clone()))
            .collect())
    }

    async fn describe(&self, element: &ElementHandle) -> Result<ElementState, PageError> {
        self.elements
            .lock()
            .iter()
            .find(|e| e.handle == element.id())
            .map(|e| ElementState {
                tag_name: e.tag.to_uppercase(),
                text: format!("  {}  ", e.text),
                attributes: e.attributes.clone(),
                bounding_box: e.bounding_box,
            })
            .ok_or_else(|| PageError::Detached(element.id().to_string()))
    }
}

/// Page whose `find` hangs for one selector and behaves like `inner` for
/// everything else.
pub struct StallingPage {
    pub inner: Arc<FakePage>,
    pub stalled: String,
    pub delay: Duration,
}

#[async_trait]
impl PagePort for StallingPage {
    async fn find(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError> {
        if selector == self.stalled {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.find(selector).await
    }

    async fn describe(&self, element: &ElementHandle) -> Result<ElementState, PageError> {
        self.inner.describe(element).await
    }
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    contains: Vec<String>,
}

impl Compound {
    fn matches(&self, element: &FakeElement) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&element.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attributes.get("id") != Some(id) {
                return false;
            }
        }
        let classes: Vec<&str> = element
            .attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
        if !self
            .attributes
            .iter()
            .all(|(name, value)| element.attributes.get(name) == Some(value))
        {
            return false;
        }
        self.contains.iter().all(|text| element.text.contains(text.as_str()))
    }
}

fn parse(selector: &str) -> Option<Compound> {
    let chars: Vec<char> = selector.trim().chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if pos < chars.len() && !matches!(chars[pos], '#' | '.' | '[' | ':') {
        compound.tag = Some(read_ident(&chars, &mut pos)?);
    }
    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                compound.id = Some(read_ident(&chars, &mut pos)?);
            }
            '.' => {
                pos += 1;
                compound.classes.push(read_ident(&chars, &mut pos)?);
            }
            '[' => {
                pos += 1;
                let name = read_ident(&chars, &mut pos)?;
                expect(&chars, &mut pos, '=')?;
                let value = read_quoted(&chars, &mut pos)?;
                expect(&chars, &mut pos, ']')?;
                compound.attributes.push((name, value));
            }
            ':' => {
                pos += 1;
                let pseudo = read_ident(&chars, &mut pos)?;
                if pseudo != "contains" {
                    return None;
                }
                expect(&chars, &mut pos, '(')?;
                let text = read_quoted(&chars, &mut pos)?;
                expect(&chars, &mut pos, ')')?;
                compound.contains.push(text);
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn expect(chars: &[char], pos: &mut usize, ch: char) -> Option<()> {
    if chars.get(*pos) == Some(&ch) {
        *pos += 1;
        Some(())
    } else {
        None
    }
}

fn read_ident(chars: &[char], pos: &mut usize) -> Option<String> {
    let mut out = String::new();
    while let Some(&ch) = chars.get(*pos) {
        if ch == '\\' {
            *pos += 1;
            out.push(read_escape(chars, pos)?);
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch as u32 >= 0x80 {
            out.push(ch);
            *pos += 1;
        } else {
            break;
        }
    }
    (!out.is_empty()).then_some(out)
}

fn read_quoted(chars: &[char], pos: &mut usize) -> Option<String> {
    expect(chars, pos, '"')?;
    let mut out = String::new();
    loop {
        let ch = *chars.get(*pos)?;
        *pos += 1;
        match ch {
            '"' => return Some(out),
            '\\' => out.push(read_escape(chars, pos)?),
            other => out.push(other),
        }
    }
}

fn read_escape(chars: &[char], pos: &mut usize) -> Option<char> {
    let mut hex = String::new();
    while hex.len() < 6 {
        match chars.get(*pos) {
            Some(ch) if ch.is_ascii_hexdigit() => {
                hex.push(*ch);
                *pos += 1;
            }
            _ => break,
        }
    }
    if hex.is_empty() {
        let ch = *chars.get(*pos)?;
        *pos += 1;
        return Some(ch);
    }
    if chars.get(*pos) == Some(&' ') {
        *pos += 1;
    }
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}

/// Store wrapper that remembers every write, in order.
pub struct RecordingStore<S> {
    inner: S,
    writes: Mutex<Vec<(String, ElementSnapshot)>>,
    reads: Mutex<Vec<String>>,
}

impl<S: SnapshotStore> RecordingStore<S> {
    pub fn new(inner: S) -> Arc<Self> {
        Arc::new(Self {
            inner,
            writes: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
        })
    }

    pub fn writes(&self) -> Vec<(String, ElementSnapshot)> {
        self.writes.lock().clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }
}

#[async_trait]
impl<S: SnapshotStore> SnapshotStore for RecordingStore<S> {
    async fn write(&self, key: &str, snapshot: &ElementSnapshot) -> Result<(), StoreError> {
        self.writes
            .lock()
            .push((key.to_string(), snapshot.clone()));
        self.inner.write(key, snapshot).await
    }

    async fn read(&self, key: &str) -> Result<Option<ElementSnapshot>, StoreError> {
        self.reads.lock().push(key.to_string());
        self.inner.read(key).await
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub captured: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl DiagnosticsPort for RecordingDiagnostics {
    async fn capture_failure(
        &self,
        selector: &str,
        error: &LocatorError,
    ) -> Result<(), PageError> {
        self.captured
            .lock()
            .push((selector.to_string(), error.to_string()));
        Ok(())
    }
}
