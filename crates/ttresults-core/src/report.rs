//! # Report Renderer
//!
//! Builds the HTML standings page from [`Standings`] with a built-in tera
//! template. Every interpolated value is HTML-escaped by tera.
//!
//! The renderer never reads the clock: the "last updated" time is part of
//! [`ReportMeta`]. Same standings plus same metadata gives byte-identical
//! output.

use crate::formats::table::group_table;
use crate::primitives::CONTACT_SUBJECT;
use crate::standings::Standings;
use crate::{Gender, TtResultsError};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../templates/report.html");

/// Everything on the page that does not come from the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    /// Document `<title>`.
    pub title: String,
    /// Series name centred above every table.
    pub header: String,
    /// Footer copyright holder.
    pub organization: String,
    pub contact_name: String,
    pub contact_email: String,
    /// Shown as "Last updated on ..." under every table.
    pub updated: NaiveDateTime,
}

// =============================================================================
// TEMPLATE VIEW
// =============================================================================

#[derive(Debug, Serialize)]
struct PageView<'a> {
    title: &'a str,
    organization: &'a str,
    contact_name: &'a str,
    mailto: String,
    updated_date: String,
    updated_time: String,
    year: i32,
    sections: Vec<SectionView>,
}

#[derive(Debug, Serialize)]
struct SectionView {
    id: &'static str,
    label: &'static str,
    groups: Vec<GroupView>,
}

#[derive(Debug, Serialize)]
struct GroupView {
    anchor: String,
    bracket: String,
    table: String,
}

// =============================================================================
// RENDERER
// =============================================================================

/// Compiled report template.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Compile the built-in template.
    pub fn new() -> Result<Self, TtResultsError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| TtResultsError::Template(e.to_string()))?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera })
    }

    /// Render the full page.
    ///
    /// Both the Men and Women tabs are always present, in that order; each
    /// lists its groups in bracket order.
    pub fn render(&self, standings: &Standings, meta: &ReportMeta) -> Result<String, TtResultsError> {
        let sections = Gender::ALL
            .iter()
            .map(|&gender| SectionView {
                id: gender.tab_id(),
                label: gender.tab_label(),
                groups: standings
                    .for_gender(gender)
                    .map(|(key, ranked)| GroupView {
                        anchor: key.anchor(),
                        bracket: key.bracket.to_string(),
                        table: group_table(&meta.header, key, ranked, standings.events),
                    })
                    .collect(),
            })
            .collect();

        let view = PageView {
            title: &meta.title,
            organization: &meta.organization,
            contact_name: &meta.contact_name,
            mailto: mailto_href(&meta.contact_email),
            updated_date: meta.updated.format("%m/%d/%Y").to_string(),
            updated_time: meta.updated.format("%I:%M %p").to_string(),
            year: meta.updated.year(),
            sections,
        };

        let context =
            Context::from_serialize(&view).map_err(|e| TtResultsError::Template(e.to_string()))?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| TtResultsError::Template(e.to_string()))
    }
}

/// Convenience wrapper: compile and render in one step.
pub fn render_report(standings: &Standings, meta: &ReportMeta) -> Result<String, TtResultsError> {
    Renderer::new()?.render(standings, meta)
}

fn mailto_href(email: &str) -> String {
    format!(
        "mailto:{}?subject={}",
        email.trim(),
        CONTACT_SUBJECT.replace(' ', "%20")
    )
}

// =============================================================================
// TESTS
// =============================================================================
