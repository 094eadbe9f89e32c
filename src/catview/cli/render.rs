//! # Rendering
//!
//! Turns command results into terminal text through the minijinja templates
//! in `templates/` and the named styles in `styles.rs`.
//!
//! Layout math (column widths, truncation, padding) stays in Rust because it
//! needs Unicode-aware widths and must not count ANSI codes. Templates only
//! decide structure and which style name applies where.

use super::styles::{names, Theme};
use super::templates::{
    DETAIL_TEMPLATE, ERROR_TEMPLATE, FACETS_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE,
};
use catview::api::{CmdMessage, MessageLevel};
use catview::error::CatalogError;
use catview::filter::Facet;
use catview::index::ListedItem;
use catview::model::{CatalogItem, Contact, ScoreLabel};
use chrono::{DateTime, Utc};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Widest a card name or domain may get before it is truncated.
pub const NAME_WIDTH: usize = 40;
pub const DOMAIN_WIDTH: usize = 24;
const LABEL_WIDTH: usize = 14;
const ICON_WIDTH: usize = 2;
/// Debt entries shown before collapsing the rest into "+N more items".
const DEBT_PREVIEW: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

pub fn class_icon(class: &str) -> &'static str {
    match class {
        "App" => "🖥️",
        "Repository" => "📁",
        "Topic" => "📢",
        "Kafka" => "📨",
        "Postgres" => "🗄️",
        "SumoLogic" => "📊",
        "SaaS" => "☁️",
        "Schema" => "📝",
        "Mailbox" | "Gmail" => "📧",
        "Git" => "🔄",
        "Keyspace" => "🔑",
        _ => "📦",
    }
}

pub fn kind_style(kind: &str) -> &'static str {
    match kind {
        "Component" => names::KIND_COMPONENT,
        "Resource" => names::KIND_RESOURCE,
        "Store" => names::KIND_STORE,
        "Service" => names::KIND_SERVICE,
        _ => names::KIND_OTHER,
    }
}

pub fn score_style(label: &ScoreLabel) -> &'static str {
    match label {
        ScoreLabel::A => names::SCORE_A,
        ScoreLabel::B => names::SCORE_B,
        ScoreLabel::C => names::SCORE_C,
        ScoreLabel::D => names::SCORE_D,
        ScoreLabel::E => names::SCORE_E,
        ScoreLabel::F => names::SCORE_F,
        ScoreLabel::Other(_) => names::SCORE_OTHER,
    }
}

fn severity_style(severity: &str) -> &'static str {
    match severity.to_ascii_lowercase().as_str() {
        "critical" | "blocker" | "high" | "major" => names::SEVERITY_HIGH,
        "medium" | "moderate" => names::SEVERITY_MEDIUM,
        "low" | "minor" | "info" => names::SEVERITY_LOW,
        _ => names::MUTED,
    }
}

fn score_text(label: &ScoreLabel) -> String {
    match label.as_str() {
        "" => "-".to_string(),
        other => other.to_string(),
    }
}

fn item_count_label(count: usize) -> String {
    if count == 1 {
        "1 item in catalog".to_string()
    } else {
        format!("{} items in catalog", count)
    }
}

fn pad_to(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.width()))
}

#[derive(Serialize)]
struct CardRow {
    index: String,
    icon: &'static str,
    icon_pad: String,
    name: String,
    name_pad: String,
    kind: String,
    kind_pad: String,
    kind_style: &'static str,
    class: String,
    class_pad: String,
    domain: String,
    domain_pad: String,
    domain_style: &'static str,
    score: String,
    score_style: &'static str,
}

#[derive(Serialize)]
struct ListData {
    header: String,
    filtered_note: String,
    rows: Vec<CardRow>,
}

#[derive(Serialize, Default)]
struct DetailRow {
    kind: &'static str,
    label: String,
    pad: String,
    value: String,
    style: &'static str,
    prefix: String,
    detail: String,
}

impl DetailRow {
    fn field(label: &str, value: impl Into<String>, style: &'static str) -> Self {
        Self {
            kind: "field",
            label: label.to_string(),
            pad: pad_to(label, LABEL_WIDTH),
            value: value.into(),
            style,
            ..Default::default()
        }
    }

    /// A field whose value may be missing; missing shows as `N/A`.
    fn optional(label: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::field(label, v, names::REGULAR),
            None => Self::field(label, NOT_AVAILABLE, names::FAINT),
        }
    }

    fn heading(label: &str) -> Self {
        Self {
            kind: "heading",
            label: label.to_string(),
            ..Default::default()
        }
    }

    fn bullet(value: impl Into<String>, style: &'static str) -> Self {
        Self {
            kind: "bullet",
            value: value.into(),
            style,
            ..Default::default()
        }
    }

    fn note(value: impl Into<String>, style: &'static str) -> Self {
        Self {
            kind: "note",
            value: value.into(),
            style,
            ..Default::default()
        }
    }

    fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

#[derive(Serialize)]
struct Section {
    title: &'static str,
    rows: Vec<DetailRow>,
}

#[derive(Serialize)]
struct DetailData {
    icon: &'static str,
    name: String,
    kind: String,
    kind_style: &'static str,
    class: String,
    score: String,
    score_style: &'static str,
    sections: Vec<Section>,
}

#[derive(Serialize)]
struct FacetValueRow {
    marker: &'static str,
    marker_style: &'static str,
    value: String,
    pad: String,
    count: usize,
}

#[derive(Serialize)]
struct FacetGroup {
    title: &'static str,
    values: Vec<FacetValueRow>,
}

#[derive(Serialize)]
struct FacetsData {
    facets: Vec<FacetGroup>,
    summary: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ErrorData {
    headline: String,
    detail: String,
}

/// Template environment bound to one theme and one color decision.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: Theme, use_color: bool) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            let text = value.to_string();
            if use_color {
                theme.apply(&name, &text)
            } else {
                // Still flag unknown style names when colors are off
                theme.apply_plain(&name, &text)
            }
        });
        Self { env }
    }

    fn render<T: Serialize>(&self, template: &'static str, data: &T) -> String {
        self.env
            .template_from_str(template)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// The card listing, headed by the visible count.
    pub fn render_list(&self, listed: &[ListedItem], total: usize) -> String {
        let name_width = column_width(listed.iter().map(|li| li.item.name()), NAME_WIDTH);
        let kind_width = column_width(listed.iter().map(|li| li.item.kind.as_str()), usize::MAX);
        let class_width = column_width(listed.iter().map(|li| li.item.class.as_str()), usize::MAX);
        let domain_width = column_width(
            listed.iter().map(|li| li.item.domain().unwrap_or(NO_DOMAIN)),
            DOMAIN_WIDTH,
        );
        let index_width = listed
            .iter()
            .map(|li| format!("{}.", li.index).width())
            .max()
            .unwrap_or(0);

        let rows = listed
            .iter()
            .map(|li| {
                let item = &li.item;
                let icon = class_icon(&item.class);
                let name = truncate_to_width(item.name(), name_width);
                let (domain, domain_style) = match item.domain() {
                    Some(domain) => (truncate_to_width(domain, domain_width), names::MUTED),
                    None => (NO_DOMAIN.to_string(), names::FAINT),
                };
                CardRow {
                    index: format!("{:>width$}", format!("{}.", li.index), width = index_width),
                    icon,
                    icon_pad: pad_to(icon, ICON_WIDTH),
                    name_pad: pad_to(&name, name_width),
                    name,
                    kind: item.kind.clone(),
                    kind_pad: pad_to(&item.kind, kind_width),
                    kind_style: kind_style(&item.kind),
                    class: item.class.clone(),
                    class_pad: pad_to(&item.class, class_width),
                    domain_pad: pad_to(&domain, domain_width),
                    domain,
                    domain_style,
                    score: score_text(&item.score.label),
                    score_style: score_style(&item.score.label),
                }
            })
            .collect();

        let filtered_note = if listed.len() == total {
            String::new()
        } else {
            format!(" (of {})", total)
        };

        self.render(
            LIST_TEMPLATE,
            &ListData {
                header: item_count_label(listed.len()),
                filtered_note,
                rows,
            },
        )
    }

    /// The detail panel for one item.
    pub fn render_detail(&self, item: &CatalogItem) -> String {
        let data = DetailData {
            icon: class_icon(&item.class),
            name: item.name().to_string(),
            kind: item.kind.clone(),
            kind_style: kind_style(&item.kind),
            class: item.class.clone(),
            score: score_text(&item.score.label),
            score_style: score_style(&item.score.label),
            sections: detail_sections(item),
        };
        self.render(DETAIL_TEMPLATE, &data)
    }

    /// The filter sidebar: every category value with its count and checkbox.
    pub fn render_facets(&self, facets: &[Facet], visible: usize, total: usize) -> String {
        let groups = facets
            .iter()
            .map(|facet| {
                let width = column_width(facet.values.iter().map(|v| v.value.as_str()), NAME_WIDTH);
                FacetGroup {
                    title: facet.category.title(),
                    values: facet
                        .values
                        .iter()
                        .map(|v| {
                            let value = truncate_to_width(&v.value, width);
                            FacetValueRow {
                                marker: if v.selected { "[x]" } else { "[ ]" },
                                marker_style: if v.selected {
                                    names::CHECKED
                                } else {
                                    names::FAINT
                                },
                                pad: pad_to(&value, width),
                                value,
                                count: v.count,
                            }
                        })
                        .collect(),
                }
            })
            .collect();

        self.render(
            FACETS_TEMPLATE,
            &FacetsData {
                facets: groups,
                summary: format!("{} of {} items match", visible, total),
            },
        )
    }

    pub fn render_messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let messages = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect();

        self.render(MESSAGES_TEMPLATE, &MessagesData { messages })
    }

    /// Fetch failures get the full error screen; anything else is one line.
    pub fn render_error(&self, err: &CatalogError) -> String {
        let data = if err.is_fetch_failure() {
            ErrorData {
                headline: "Error".to_string(),
                detail: err.to_string(),
            }
        } else {
            ErrorData {
                headline: format!("Error: {}", err),
                detail: String::new(),
            }
        };
        self.render(ERROR_TEMPLATE, &data)
    }
}

const NO_DOMAIN: &str = "No Domain";

fn column_width<'a>(values: impl Iterator<Item = &'a str>, cap: usize) -> usize {
    values.map(|v| v.width()).max().unwrap_or(0).min(cap)
}

fn contact_rows(rows: &mut Vec<DetailRow>, label: &str, contacts: &[Contact]) {
    if contacts.is_empty() {
        return;
    }
    rows.push(DetailRow::heading(label));
    rows.extend(
        contacts
            .iter()
            .map(|c| DetailRow::bullet(c.label(), names::REGULAR)),
    );
}

fn list_or_none(rows: &mut Vec<DetailRow>, label: &str, values: &[String]) {
    if values.is_empty() {
        rows.push(DetailRow::field(label, "None", names::FAINT));
        return;
    }
    rows.push(DetailRow::heading(label));
    rows.extend(values.iter().map(|v| DetailRow::bullet(v, names::REGULAR)));
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

fn detail_sections(item: &CatalogItem) -> Vec<Section> {
    let mut sections = Vec::new();

    sections.push(Section {
        title: "Classification",
        rows: vec![
            DetailRow::optional("Domain", item.domain()),
            DetailRow::optional("Team", item.team()),
            DetailRow::optional("Capability", item.capability()),
            DetailRow::optional("Tag", item.tag()),
        ],
    });

    let meta = &item.metadata;
    let mut rows = vec![match non_empty(&meta.description) {
        Some(description) => DetailRow::field("Description", description, names::REGULAR),
        None => DetailRow::field("Description", "No description provided", names::FAINT),
    }];
    rows.push(DetailRow::optional("License", non_empty(&meta.license)));
    if let Some(tier) = meta.tier.as_deref().and_then(non_empty) {
        rows.push(DetailRow::field("Tier", tier, names::REGULAR));
    }
    if let Some(contact) = meta.contact.as_deref().and_then(non_empty) {
        rows.push(DetailRow::field("Contact", contact, names::REGULAR));
    }
    sections.push(Section {
        title: "Metadata",
        rows,
    });

    let contact = &item.contact;
    let mut rows = vec![match &contact.owner {
        Some(owner) => DetailRow::field("Owner", owner.label(), names::REGULAR),
        None => DetailRow::field("Owner", NOT_AVAILABLE, names::FAINT),
    }];
    contact_rows(&mut rows, "Contributors", &contact.contributors);
    contact_rows(&mut rows, "Support", &contact.support);
    contact_rows(&mut rows, "Participants", &contact.participants);
    sections.push(Section {
        title: "Contact Information",
        rows,
    });

    let deps = &item.dependencies;
    let mut rows = Vec::new();
    list_or_none(&mut rows, "Upstream", &deps.upstream);
    list_or_none(&mut rows, "Downstream", &deps.downstream);
    if !deps.triggers.is_empty() {
        rows.push(DetailRow::heading("Triggers"));
        rows.extend(
            deps.triggers
                .iter()
                .map(|t| DetailRow::bullet(t, names::REGULAR)),
        );
    }
    if let Some(provider) = deps.provided_by.as_deref().and_then(non_empty) {
        rows.push(DetailRow::field("Provided By", provider, names::REGULAR));
    }
    sections.push(Section {
        title: "Dependencies",
        rows,
    });

    if !item.runtime.endpoints.is_empty() {
        sections.push(Section {
            title: "Runtime",
            rows: item
                .runtime
                .endpoints
                .iter()
                .map(|ep| {
                    let row = DetailRow::bullet(&ep.location, names::LINK);
                    match non_empty(&ep.intent) {
                        Some(intent) => row.with_prefix(format!("{}: ", intent)),
                        None => row,
                    }
                })
                .collect(),
        });
    }

    if !item.links.is_empty() {
        sections.push(Section {
            title: "Links",
            rows: item
                .links
                .iter()
                .map(|link| {
                    let row = DetailRow::bullet(&link.url, names::LINK)
                        .with_prefix(format!("{}: ", link.kind));
                    match link.description.as_deref().and_then(non_empty) {
                        Some(description) => row.with_detail(format!(" ({})", description)),
                        None => row,
                    }
                })
                .collect(),
        });
    }

    let entries = &item.debt.entries;
    if !entries.is_empty() {
        let mut rows = Vec::new();
        if let Some(total) = item.debt.total {
            rows.push(DetailRow::field("Total", total.to_string(), names::REGULAR));
        }
        for entry in entries.iter().take(DEBT_PREVIEW) {
            let detail = match (non_empty(&entry.description), non_empty(&entry.severity)) {
                (Some(d), Some(s)) => format!(" {} ({})", d, s),
                (Some(d), None) => format!(" {}", d),
                (None, Some(s)) => format!(" ({})", s),
                (None, None) => String::new(),
            };
            rows.push(
                DetailRow::bullet(&entry.name, severity_style(&entry.severity)).with_detail(detail),
            );
        }
        if entries.len() > DEBT_PREVIEW {
            rows.push(DetailRow::note(
                format!("+{} more items", entries.len() - DEBT_PREVIEW),
                names::MUTED,
            ));
        }
        sections.push(Section {
            title: "Technical Debt",
            rows,
        });
    }

    let audit = &item.audit;
    if !audit.operations.is_empty() || audit.source.is_some() {
        let mut rows = Vec::new();
        if let Some(source) = audit.source.as_deref().and_then(non_empty) {
            rows.push(DetailRow::field("Source", source, names::REGULAR));
        }
        for op in &audit.operations {
            let when = op
                .updated_at()
                .map(format_time_ago)
                .unwrap_or_else(|| op.updated.clone());
            let mut parts: Vec<String> = Vec::new();
            if let Some(description) = non_empty(&op.description) {
                parts.push(description.to_string());
            }
            if !when.is_empty() {
                parts.push(when);
            }
            if let Some(who) = op.updated_by.as_deref().and_then(non_empty) {
                parts.push(format!("by {}", who));
            }
            let detail = if parts.is_empty() {
                String::new()
            } else {
                format!(" {}", parts.join(", "))
            };
            rows.push(DetailRow::bullet(&op.name, names::REGULAR).with_detail(detail));
        }
        sections.push(Section {
            title: "Audit",
            rows,
        });
    }

    sections
}

/// Cuts `s` to at most `max_width` display columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::setup::ThemeMode;
    use crate::cli::styles::resolve_theme;
    use catview::filter::{facets, FilterCategory, FilterSelection};
    use catview::index::index_items;
    use catview::model::{DebtEntry, Link, Operation};

    fn plain() -> Renderer {
        Renderer::new(resolve_theme(ThemeMode::Light), false)
    }

    fn sample() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "Checkout API", "Service", "App")
                .with_domain("Payments")
                .with_score(91.0, "A"),
            CatalogItem::new("2", "ledger-db", "Store", "Postgres").with_score(40.0, "Z"),
        ]
    }

    #[test]
    fn list_has_count_header_and_cards() {
        let items = sample();
        let listed = index_items(items.iter().collect());
        let output = plain().render_list(&listed, 2);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "2 items in catalog");
        assert!(lines[1].is_empty());
        assert!(lines[2].starts_with("1. 🖥️"));
        assert!(lines[2].contains("Checkout API"));
        assert!(lines[2].contains("Payments"));
        assert!(lines[2].trim_end().ends_with('A'));
        assert!(lines[3].contains("No Domain"));
        assert!(lines[3].trim_end().ends_with('Z'));
        assert!(!output.contains("(!?)"));
    }

    #[test]
    fn filtered_list_mentions_total() {
        let items = sample();
        let listed = index_items(vec![&items[1]]);
        let output = plain().render_list(&listed, 2);
        assert!(output.starts_with("1 item in catalog (of 2)"));
    }

    #[test]
    fn empty_list_shows_hint() {
        let output = plain().render_list(&[], 5);
        assert!(output.starts_with("0 items in catalog (of 5)"));
        assert!(output.contains("No items found"));
        assert!(output.contains("Try adjusting your search or filters."));
    }

    #[test]
    fn detail_uses_placeholders_for_missing_values() {
        let item = CatalogItem::new("x", "Bare", "Widget", "Unknown");
        let output = plain().render_detail(&item);

        assert!(output.starts_with("📦 Bare"));
        assert!(output.contains("Classification"));
        assert!(output.contains("Domain        N/A"));
        assert!(output.contains("No description provided"));
        assert!(output.contains("Upstream      None"));
        assert!(output.contains("Owner         N/A"));
        assert!(!output.contains("Technical Debt"));
        assert!(!output.contains("Links"));
        assert!(!output.contains("(!?)"));
    }

    #[test]
    fn detail_collapses_long_debt_lists() {
        let mut item = CatalogItem::new("x", "Debtor", "Service", "App");
        item.debt.entries = (1..=7)
            .map(|i| DebtEntry {
                name: format!("debt-{}", i),
                description: "needs work".into(),
                severity: "High".into(),
            })
            .collect();
        let output = plain().render_detail(&item);

        assert!(output.contains("• debt-5 needs work (High)"));
        assert!(!output.contains("debt-6"));
        assert!(output.contains("+2 more items"));
    }

    #[test]
    fn detail_lists_links_and_audit() {
        let mut item = CatalogItem::new("x", "Linked", "Service", "App");
        item.links.push(Link {
            kind: "docs".into(),
            url: "https://docs.example.com".into(),
            ..Default::default()
        });
        item.audit.operations.push(Operation {
            name: "create".into(),
            updated: (Utc::now() - chrono::Duration::days(3)).to_rfc3339(),
            description: "Initial import".into(),
            updated_by: Some("importer".into()),
        });
        let output = plain().render_detail(&item);

        assert!(output.contains("• docs: https://docs.example.com"));
        assert!(output.contains("• create Initial import, 3 days ago, by importer"));
    }

    #[test]
    fn facets_mark_selected_values() {
        let items = sample();
        let selection = FilterSelection::new().with(FilterCategory::Kind, ["Store"]);
        let output = plain().render_facets(&facets(&items, &selection), 1, 2);

        assert!(output.starts_with("Filters"));
        assert!(output.contains("[ ] Service"));
        assert!(output.contains("[x] Store"));
        assert!(output.contains("1 of 2 items match"));
    }

    #[test]
    fn messages_render_one_per_line() {
        let output = plain().render_messages(&[
            CmdMessage::info("first"),
            CmdMessage::warning("second"),
        ]);
        assert_eq!(output, "first\nsecond\n");
        assert!(plain().render_messages(&[]).is_empty());
    }

    #[test]
    fn fetch_failures_render_as_error_screen() {
        let output = plain().render_error(&CatalogError::Unavailable { status: 503 });
        assert_eq!(output, "Error\nFailed to fetch catalog data (HTTP 503)\n");

        let output = plain().render_error(&CatalogError::NotFound("9".into()));
        assert_eq!(output, "Error: Item not found: 9\n");
    }

    #[test]
    fn color_mode_emits_ansi() {
        let renderer = Renderer::new(resolve_theme(ThemeMode::Dark), true);
        let output = renderer.render_messages(&[CmdMessage::error("boom")]);
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a-very-long-name", 6), "a-ver…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn icon_and_badge_lookups_fall_back() {
        assert_eq!(class_icon("Gmail"), "📧");
        assert_eq!(class_icon("Mainframe"), "📦");
        assert_eq!(kind_style("Store"), names::KIND_STORE);
        assert_eq!(kind_style("Gadget"), names::KIND_OTHER);
        assert_eq!(score_style(&ScoreLabel::Other("Z".into())), names::SCORE_OTHER);
    }
}
