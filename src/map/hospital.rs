use anyhow::Result;
use polars::frame::DataFrame;
use serde::Serialize;
use tracing::debug;

use crate::io::{csv::{cell, parse_coord, text_column}, svg::escape_xml};

/// Policy designation of a hospital, from the `type` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HospitalKind {
    /// Tier-A hospital without the policy designation (`Tier_A_Only`).
    BaselineTierA,
    /// Tier-A hospital designated under the policy (`Policy_Designated`).
    PolicyTierA,
    /// Designated hospital below tier A (`Non_Tier_A_Policy`).
    PolicyNonTierA,
}

impl HospitalKind {
    pub const ALL: [Self; 3] = [Self::BaselineTierA, Self::PolicyTierA, Self::PolicyNonTierA];

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Tier_A_Only" => Some(Self::BaselineTierA),
            "Policy_Designated" => Some(Self::PolicyTierA),
            "Non_Tier_A_Policy" => Some(Self::PolicyNonTierA),
            _ => None,
        }
    }

    pub fn is_policy_designated(self) -> bool {
        !matches!(self, Self::BaselineTierA)
    }

    /// Layer name shown in the layer control.
    pub(crate) fn layer_name(self) -> &'static str {
        match self {
            Self::BaselineTierA => "普通三甲 (Baseline Tier-A)",
            Self::PolicyTierA => "药械通指定-三甲 (Policy Designated - Tier A)",
            Self::PolicyNonTierA => "药械通指定-非三甲 (Policy Designated - Non Tier A)",
        }
    }

    /// Category line under the name in a popup.
    pub(crate) fn popup_caption(self) -> &'static str {
        match self {
            Self::BaselineTierA => "普通三甲",
            Self::PolicyTierA => "药械通指定-三甲",
            Self::PolicyNonTierA => "药械通指定-非三甲",
        }
    }

    pub(crate) fn marker_style(self) -> MarkerStyle {
        match self {
            Self::BaselineTierA => MarkerStyle::circle(4.0, "#444444", 0.5),
            Self::PolicyTierA => MarkerStyle::circle(6.0, "red", 0.8),
            Self::PolicyNonTierA => MarkerStyle::circle(6.0, "#336e99", 0.7),
        }
    }

    pub(crate) fn popup(self, name: &str) -> String {
        let name = escape_xml(name);
        match self {
            Self::BaselineTierA => format!("{name}<br>({})", self.popup_caption()),
            _ => format!("<strong>{name}</strong><br>({})", self.popup_caption()),
        }
    }
}

/// How a point layer is drawn in the browser.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum MarkerStyle {
    Circle { radius: f64, color: &'static str, fill_opacity: f64 },
    Star { color: &'static str },
}

impl MarkerStyle {
    fn circle(radius: f64, color: &'static str, fill_opacity: f64) -> Self {
        Self::Circle { radius, color, fill_opacity }
    }
}

/// A geocoded hospital.
#[derive(Clone, Debug, PartialEq)]
pub struct Hospital {
    pub name: String,
    pub kind: HospitalKind,
    pub lng: f64,
    pub lat: f64,
}

/// A border crossing shown as a landmark.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub name: String,
    pub lng: f64,
    pub lat: f64,
}

/// Rows read from a table, plus how many were dropped.
#[derive(Clone, Debug)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

impl Hospital {
    /// Read `name`, `latitude`, `longitude` and `type` columns.
    /// Rows without usable coordinates or with an unknown type are skipped.
    pub fn from_table(df: &DataFrame) -> Result<Loaded<Self>> {
        let names = text_column(df, "name")?;
        let lats = text_column(df, "latitude")?;
        let lngs = text_column(df, "longitude")?;
        let kinds = text_column(df, "type")?;

        let mut loaded = Loaded { rows: Vec::new(), skipped: 0 };
        for (row, (((name, lat), lng), kind)) in names.into_iter().zip(lats).zip(lngs).zip(kinds).enumerate() {
            let lat = cell(lat).and_then(parse_coord);
            let lng = cell(lng).and_then(parse_coord);
            let kind = cell(kind).and_then(HospitalKind::from_label);

            match (lat, lng, kind) {
                (Some(lat), Some(lng), Some(kind)) => loaded.rows.push(Hospital {
                    name: name.unwrap_or_default().trim().to_string(),
                    kind,
                    lng,
                    lat,
                }),
                _ => {
                    debug!("[map] hospital row {}: skipped ({name:?})", row + 1);
                    loaded.skipped += 1;
                }
            }
        }
        Ok(loaded)
    }
}

impl Anchor {
    /// Read `name`, `latitude` and `longitude` columns.
    pub fn from_table(df: &DataFrame) -> Result<Loaded<Self>> {
        let names = text_column(df, "name")?;
        let lats = text_column(df, "latitude")?;
        let lngs = text_column(df, "longitude")?;

        let mut loaded = Loaded { rows: Vec::new(), skipped: 0 };
        for (row, ((name, lat), lng)) in names.into_iter().zip(lats).zip(lngs).enumerate() {
            match (cell(lat).and_then(parse_coord), cell(lng).and_then(parse_coord)) {
                (Some(lat), Some(lng)) => loaded.rows.push(Anchor {
                    name: name.unwrap_or_default().trim().to_string(),
                    lng,
                    lat,
                }),
                _ => {
                    debug!("[map] anchor row {}: skipped ({name:?})", row + 1);
                    loaded.skipped += 1;
                }
            }
        }
        Ok(loaded)
    }

    pub(crate) fn popup(&self) -> String {
        format!("<strong>{}</strong>", escape_xml(&self.name))
    }
}
