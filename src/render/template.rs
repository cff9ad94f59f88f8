//! HTML fragments for the grid.

use chrono::NaiveDate;
use minijinja::{Environment, Value, context};

use super::layout::{EmptyState, Grid, GridItem};
use crate::domain::share::DEEP_LINK_PARAM;
use crate::domain::{AdSlot, NoteRecord, SponsorContent};
use crate::favorites::FavoriteSet;
use crate::infra::highlight;

const CARD_TEMPLATE: &str = r##"<div class="pdf-card" data-category="{{ category }}" data-id="{{ id }}">
    <div class="pdf-header">
        <div class="pdf-icon"><i class="fas fa-file-pdf"></i></div>
        <div class="pdf-info"><h3>{{ title }}</h3>{% if is_new %}<span class="new-badge">New</span>{% endif %}</div>
    </div>
    <div class="pdf-meta">
        <div class="pdf-category"><i class="fas {{ icon }}"></i> {{ category }}</div>
        <div class="pdf-date"><i class="fas fa-calendar"></i> <time datetime="{{ date_iso }}">{{ date }}</time></div>
    </div>
    <p class="pdf-description">{{ description }}</p>
    <div class="pdf-actions">
        <a class="btn btn-primary" href="?{{ param }}={{ id }}"><i class="fas fa-eye"></i> View</a>
        <button class="btn btn-favorite{% if is_favorite %} active{% endif %}" data-id="{{ id }}" title="Save Note"><i class="{% if is_favorite %}fas{% else %}far{% endif %} fa-heart"></i></button>
        <button class="btn btn-secondary" data-share="{{ id }}"><i class="fas fa-share-alt"></i></button>
    </div>
</div>
"##;

const SPONSOR_TEMPLATE: &str = r##"<a href="{{ link }}" target="{{ target }}" class="sponsored-card" data-slot="{{ slot }}" data-label="{{ label }}">
    <span class="sponsored-badge">Sponsored</span>
    {% if image_url %}<img src="{{ image_url }}" alt="{{ label }}" class="sponsored-image" loading="lazy">
    {% else %}<div class="sponsored-content">
        <div class="sponsored-title">{{ title }}</div>
        <div class="sponsored-body">{{ body }}</div>
        {% if cta %}<span class="sponsored-cta">{{ cta }}</span>{% endif %}
    </div>
    {% endif %}
</a>
"##;

const PLACEHOLDER_TEMPLATE: &str = r##"<a href="mailto:notes@alokdasofficial.in?subject=Sponsorship Inquiry" class="sponsored-fallback" data-slot="{{ slot }}">
    <i class="fas fa-bullhorn"></i>
    <h4>Advertise Here</h4>
    <p>Let others know your presence.</p>
</a>
"##;

const PANEL_TEMPLATE: &str = r##"<div class="empty-state">
    <i class="fas {{ icon }}"></i>
    <h3>{{ heading }}</h3>
    <p>{{ message }}</p>
</div>
"##;

/// Font Awesome icon for a category.
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Organic" => "fa-flask",
        "Inorganic" => "fa-atom",
        "Physical" => "fa-calculator",
        _ => "fa-file-pdf",
    }
}

/// Per-render inputs that are not part of the grid itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub today: NaiveDate,
    pub search: &'a str,
    pub favorites: &'a FavoriteSet,
}

/// Renders grids to HTML with a fixed set of templates.
///
/// Template names end in `.html`, so every interpolated value is escaped.
/// Highlighted text is escaped by [`highlight`] first and passed through as
/// safe markup.
pub struct GridRenderer {
    env: Environment<'static>,
}

impl GridRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("card.html", CARD_TEMPLATE)?;
        env.add_template("sponsor.html", SPONSOR_TEMPLATE)?;
        env.add_template("placeholder.html", PLACEHOLDER_TEMPLATE)?;
        env.add_template("panel.html", PANEL_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders the whole grid, or the empty state.
    pub fn render(&self, grid: &Grid, ctx: &RenderContext) -> Result<String, minijinja::Error> {
        match grid {
            Grid::Empty(state) => self.render_empty(*state),
            Grid::Items(items) => {
                let mut html = String::new();
                for item in items {
                    let fragment = match item {
                        GridItem::Card(record) => self.render_card(record, ctx)?,
                        GridItem::Sponsor { slot, ad: Some(ad) } => self.render_sponsor(slot, ad)?,
                        GridItem::Sponsor { slot, ad: None } => self.render_placeholder(slot)?,
                    };
                    html.push_str(&fragment);
                }
                Ok(html)
            }
        }
    }

    pub fn render_card(&self, record: &NoteRecord, ctx: &RenderContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("card.html")?;
        tmpl.render(context! {
            id => record.id().as_str(),
            param => DEEP_LINK_PARAM,
            title => Value::from_safe_string(highlight(record.title(), ctx.search)),
            description => Value::from_safe_string(highlight(record.description(), ctx.search)),
            category => record.category(),
            icon => category_icon(record.category()),
            date => record.upload_date().format("%b %-d, %Y").to_string(),
            date_iso => record.upload_date().format("%Y-%m-%d").to_string(),
            is_new => record.is_new(ctx.today),
            is_favorite => ctx.favorites.contains(record.id()),
        })
    }

    pub fn render_sponsor(&self, slot: &str, ad: &AdSlot) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("sponsor.html")?;
        let (link, target) = match ad.link.as_deref() {
            Some(link) => (link, "_blank"),
            None => ("#", "_self"),
        };
        match &ad.content {
            SponsorContent::Image { image_url, .. } => tmpl.render(context! {
                slot, link, target,
                label => ad.label(),
                image_url,
            }),
            SponsorContent::Text { title, body, cta_text } => tmpl.render(context! {
                slot, link, target,
                label => ad.label(),
                title, body,
                cta => cta_text,
            }),
        }
    }

    pub fn render_placeholder(&self, slot: &str) -> Result<String, minijinja::Error> {
        self.env.get_template("placeholder.html")?.render(context! { slot })
    }

    pub fn render_empty(&self, state: EmptyState) -> Result<String, minijinja::Error> {
        let icon = match state {
            EmptyState::NoResults => "fa-search",
            EmptyState::NoFavorites => "fa-heart",
        };
        self.render_panel(icon, state.heading(), state.message())
    }

    /// Panel shown when the catalog could not be loaded at all.
    pub fn render_connection_error(&self) -> Result<String, minijinja::Error> {
        self.render_panel("fa-exclamation-triangle", "Connection Error", "Unable to load notes.")
    }

    /// Panel shown while the site is in maintenance.
    pub fn render_maintenance(&self) -> Result<String, minijinja::Error> {
        self.render_panel("fa-tools", "Under Maintenance", "ClassNotes will be back shortly.")
    }

    fn render_panel(&self, icon: &str, heading: &str, message: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template("panel.html")?
            .render(context! { icon, heading, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryFilter, RecordId, Semester, SponsorBoard};
    use crate::render::layout::layout;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(id: &str, title: &str, category: &str, uploaded: &str) -> NoteRecord {
        NoteRecord::builder(id.parse().unwrap(), title, Semester::new(1).unwrap(), date(uploaded))
            .category(category)
            .description("Reaction mechanisms & more")
            .build()
    }

    fn ctx<'a>(search: &'a str, favorites: &'a FavoriteSet) -> RenderContext<'a> {
        RenderContext {
            today: date("2025-09-25"),
            search,
            favorites,
        }
    }

    #[test]
    fn card_escapes_and_highlights() {
        let renderer = GridRenderer::new().unwrap();
        let favorites = FavoriteSet::new();
        let r = record("a", "Organic <b>Chem</b>", "Organic", "2025-09-22");

        let html = renderer.render_card(&r, &ctx("chem", &favorites)).unwrap();

        assert!(html.contains(r#"&lt;b&gt;<span class="highlight">Chem</span>&lt;/b&gt;"#));
        assert!(html.contains("Reaction mechanisms &amp; more"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("fa-flask"));
        assert!(html.contains("Sep 22, 2025"));
    }

    #[test]
    fn card_highlight_keeps_entities_intact() {
        let renderer = GridRenderer::new().unwrap();
        let favorites = FavoriteSet::new();
        let r = record("a", "Sample & <co>", "Organic", "2025-09-22");

        let html = renderer.render_card(&r, &ctx("amp", &favorites)).unwrap();

        assert!(html.contains(r#"S<span class="highlight">amp</span>le &amp; &lt;co&gt;"#));
        assert!(html.contains("Reaction mechanisms &amp; more"));
        assert!(!html.contains(r#"&<span class="highlight">"#));
    }

    #[test]
    fn card_shows_new_badge_and_favorite_state() {
        let renderer = GridRenderer::new().unwrap();
        let favorites: FavoriteSet = ["a".parse::<RecordId>().unwrap()].into_iter().collect();

        let fresh = renderer
            .render_card(&record("a", "Fresh", "Physical", "2025-09-20"), &ctx("", &favorites))
            .unwrap();
        assert!(fresh.contains("new-badge"));
        assert!(fresh.contains("btn-favorite active"));
        assert!(fresh.contains("fas fa-heart"));

        let old = renderer
            .render_card(&record("b", "Old", "Misc", "2025-08-01"), &ctx("", &favorites))
            .unwrap();
        assert!(!old.contains("new-badge"));
        assert!(old.contains("far fa-heart"));
        assert!(old.contains("fa-file-pdf"));
    }

    #[test]
    fn sponsor_variants() {
        let renderer = GridRenderer::new().unwrap();
        let image = AdSlot {
            active: true,
            link: Some("https://tutor.example".into()),
            content: SponsorContent::Image {
                image_url: "https://img.example/banner.png".into(),
                title: None,
            },
        };
        let html = renderer.render_sponsor("slot_grid_1", &image).unwrap();
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"alt="Advertisement""#));

        let text = AdSlot {
            active: true,
            link: None,
            content: SponsorContent::Text {
                title: "Weekend batch".into(),
                body: "Crash course".into(),
                cta_text: Some("Enroll".into()),
            },
        };
        let html = renderer.render_sponsor("slot_grid_2", &text).unwrap();
        assert!(html.contains(r#"target="_self""#));
        assert!(html.contains("Weekend batch"));
        assert!(html.contains(r#"<span class="sponsored-cta">Enroll</span>"#));
    }

    #[test]
    fn grid_renders_cards_then_placeholder() {
        let renderer = GridRenderer::new().unwrap();
        let favorites = FavoriteSet::new();
        let records = [
            record("a", "Alkenes", "Organic", "2025-09-22"),
            record("b", "Gas laws", "Physical", "2025-09-20"),
        ];
        let visible: Vec<_> = records.iter().collect();
        let board = SponsorBoard::default();
        let grid = layout(&visible, &board, &CategoryFilter::All);

        let html = renderer.render(&grid, &ctx("", &favorites)).unwrap();

        let a = html.find("Alkenes").unwrap();
        let b = html.find("Gas laws").unwrap();
        let ad = html.find("Advertise Here").unwrap();
        assert!(a < b && b < ad);
        assert_eq!(html.matches("Advertise Here").count(), 1);
    }

    #[test]
    fn empty_states_differ() {
        let renderer = GridRenderer::new().unwrap();
        let general = renderer.render_empty(EmptyState::NoResults).unwrap();
        let favorites = renderer.render_empty(EmptyState::NoFavorites).unwrap();
        assert!(general.contains("No notes found"));
        assert!(favorites.contains("No saved notes yet"));
    }

    #[test]
    fn connection_error_panel() {
        let html = GridRenderer::new().unwrap().render_connection_error().unwrap();
        assert!(html.contains("Connection Error"));
    }
}
