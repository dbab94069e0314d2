use serde::{Deserialize, Serialize};

pub const BASE_URL_ID: &str = "BaseURL";
pub const GROUP_SELECT_ID: &str = "select_group";
pub const BLDG_SELECT_ID: &str = "select_bldg";
pub const CHART_SELECT_ID: &str = "select_chart";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHandles {
    pub base_url: String,
    pub group: String,
    pub building: String,
    pub chart: String,
}

impl Default for PageHandles {
    fn default() -> Self {
        Self {
            base_url: BASE_URL_ID.to_string(),
            group: GROUP_SELECT_ID.to_string(),
            building: BLDG_SELECT_ID.to_string(),
            chart: CHART_SELECT_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Replaced { id: String },
    Changed { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageSnapshot {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub groups: Vec<SelectOption>,
    #[serde(default)]
    pub buildings: Vec<SelectOption>,
    #[serde(default)]
    pub charts: Vec<SelectOption>,
}

impl PageSnapshot {
    pub fn group(&self) -> Option<&str> {
        selected_value(&self.groups)
    }

    pub fn building(&self) -> Option<&str> {
        selected_value(&self.buildings)
    }

    pub fn chart(&self) -> Option<&str> {
        selected_value(&self.charts)
    }
}

fn selected_value(options: &[SelectOption]) -> Option<&str> {
    options
        .iter()
        .find(|option| option.selected)
        .map(|option| option.value.as_str())
}
