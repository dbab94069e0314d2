use crate::fragment::{parse_options, render_options};
use crate::models::{PageHandles, PageSnapshot, SelectOption};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(String),
    Select(SelectControl),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl SelectControl {
    pub fn new(options: Vec<SelectOption>) -> Self {
        // the last `selected` option wins, as in a browser
        let selected = options
            .iter()
            .rposition(|option| option.selected)
            .or(if options.is_empty() { None } else { Some(0) });
        Self { options, selected }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.value.as_str())
    }

    /// Selects the first option with `value`. Returns false and leaves the
    /// selection alone when no option matches.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option.value == value) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn set_inner_html(&mut self, html: &str) {
        *self = Self::new(parse_options(html));
    }

    pub fn inner_html(&self) -> String {
        render_options(&self.current_options())
    }

    pub fn current_options(&self) -> Vec<SelectOption> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| SelectOption {
                selected: Some(index) == self.selected,
                ..option.clone()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: HashMap<String, Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(handles: &PageHandles, snapshot: &PageSnapshot) -> Self {
        let mut page = Self::new();
        page.insert_text(&handles.base_url, &snapshot.base_url);
        page.insert_select(&handles.group, snapshot.groups.clone());
        page.insert_select(&handles.building, snapshot.buildings.clone());
        page.insert_select(&handles.chart, snapshot.charts.clone());
        page
    }

    pub fn snapshot(&self, handles: &PageHandles) -> PageSnapshot {
        let options = |id: &str| {
            self.select(id)
                .map(SelectControl::current_options)
                .unwrap_or_default()
        };
        PageSnapshot {
            base_url: self.text(&handles.base_url).unwrap_or_default().to_string(),
            groups: options(&handles.group),
            buildings: options(&handles.building),
            charts: options(&handles.chart),
        }
    }

    pub fn insert_text(&mut self, id: &str, text: &str) {
        self.elements
            .insert(id.to_string(), Element::Text(text.to_string()));
    }

    pub fn insert_select(&mut self, id: &str, options: Vec<SelectOption>) {
        self.elements
            .insert(id.to_string(), Element::Select(SelectControl::new(options)));
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.elements.get(id)? {
            Element::Text(text) => Some(text.as_str()),
            Element::Select(_) => None,
        }
    }

    pub fn select(&self, id: &str) -> Option<&SelectControl> {
        match self.elements.get(id)? {
            Element::Select(control) => Some(control),
            Element::Text(_) => None,
        }
    }

    pub fn select_mut(&mut self, id: &str) -> Option<&mut SelectControl> {
        match self.elements.get_mut(id)? {
            Element::Select(control) => Some(control),
            Element::Text(_) => None,
        }
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.select(id)?.value()
    }
}
