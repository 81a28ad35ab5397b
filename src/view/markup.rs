use std::fmt::Write;

use super::{Action, Badge, CardImage, ListView, PlaceCard, Star};

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn action_button(out: &mut String, class: &str, action: Action, id: &str, label: &str) {
    let _ = write!(
        out,
        r#"<button class="btn-action {class}" data-action="{action}" data-id="{id}">{label}</button>"#,
        action = action.as_str(),
        id = escape_html(id),
    );
}

/// Card markup. Buttons carry `data-action` / `data-id` for the
/// dispatcher instead of inline handlers.
pub fn render_card(card: &PlaceCard) -> String {
    let mut out = String::new();
    let visited_class = if card.visited { " visited" } else { "" };
    let id = escape_html(&card.id);
    let _ = write!(out, r#"<div class="place-card{visited_class}" data-id="{id}">"#);

    match &card.image {
        CardImage::Picture { src, alt } => {
            let _ = write!(out, r#"<div class="place-card-image"><img src="{src}" alt="{alt}">"#);
        }
        CardImage::Icon(icon) => {
            let _ = write!(out, r#"<div class="place-card-image no-image">{icon}"#);
        }
    }
    for badge in &card.overlay_badges {
        match badge {
            Badge::Visited => {
                let _ = write!(out, r#"<div class="visited-badge">{}</div>"#, badge.text());
            }
            Badge::Priority(priority, _) => {
                let _ = write!(
                    out,
                    r#"<div class="priority-badge {}">{}</div>"#,
                    priority.as_str(),
                    badge.text()
                );
            }
            _ => {}
        }
    }
    out.push_str("</div>");

    out.push_str(r#"<div class="place-card-content"><div class="place-card-header"><div>"#);
    let _ = write!(out, r#"<h3 class="place-name">{}</h3>"#, card.name);
    if card.show_rating {
        out.push_str(r#"<div class="place-rating">"#);
        for star in card.stars {
            let class = match star {
                Star::Filled => "filled",
                Star::Empty => "empty",
            };
            let _ = write!(out, r#"<span class="star {class}">★</span>"#);
        }
        out.push_str("</div>");
    }
    out.push_str("</div></div>");

    let _ = write!(
        out,
        r#"<div class="category-badge">{} {}</div>"#,
        card.category.icon, card.category.label
    );
    if let Some(address) = &card.address {
        let _ = write!(out, r#"<div class="place-address">📍 {address}</div>"#);
    }
    if let Some(notes) = &card.notes {
        let _ = write!(out, r#"<div class="place-notes">{notes}</div>"#);
    }
    if let Some(website) = &card.website {
        let _ = write!(
            out,
            r#"<a href="{website}" target="_blank" rel="noopener" class="place-website">🔗 אתר המקום</a>"#
        );
    }

    out.push_str(r#"<div class="place-info-badges">"#);
    for badge in &card.info_badges {
        let _ = write!(out, r#"<span class="info-badge">{}</span>"#, badge.text());
    }
    out.push_str("</div>");

    out.push_str(r#"<div class="place-card-actions">"#);
    let visited_button = if card.visited { "btn-visited active" } else { "btn-visited" };
    action_button(
        &mut out,
        visited_button,
        Action::ToggleVisited,
        &card.id,
        card.visited_button_label(),
    );
    action_button(&mut out, "btn-edit", Action::Edit, &card.id, "✏️ ערוך");
    action_button(&mut out, "btn-delete", Action::RequestDelete, &card.id, "🗑️ מחק");
    out.push_str("</div></div></div>");

    out
}

/// Markup for the card grid, or `None` when the empty / no-results state
/// should be shown instead.
pub fn render_list(list: &ListView) -> Option<String> {
    match list {
        ListView::Cards(cards) => Some(cards.iter().map(render_card).collect()),
        ListView::Empty | ListView::NoResults => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::{Category, Place, Priority};
    use crate::view::{project, CardEvent};

    fn place() -> Place {
        Place {
            id: "p1".into(),
            name: "<img src=x onerror=alert(1)>".into(),
            category: Category::Cafe,
            address: "Herzl 3".into(),
            website: "javascript:\"x\"".into(),
            rating: 2,
            priority: Priority::Low,
            notes: String::new(),
            open_saturday: false,
            online_reservation: true,
            visited: true,
            visited_date: Some(1),
            image_url: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn escape_covers_attribute_quotes() {
        assert_eq!(escape_html(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&#39;e&#39;");
        assert_eq!(escape_html("שלום"), "שלום");
    }

    #[test]
    fn card_markup_has_no_raw_user_html() {
        let html = render_card(&project(&place()));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("href="));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn card_markup_wires_actions() {
        let html = render_card(&project(&place()));
        assert!(html.contains(r#"data-action="toggle-visited" data-id="p1""#));
        assert!(html.contains(r#"data-action="edit" data-id="p1""#));
        assert!(html.contains(r#"data-action="delete" data-id="p1""#));
        assert_eq!(html.matches("star filled").count(), 2);
        assert_eq!(html.matches("star empty").count(), 3);
        assert!(html.contains(r#"<div class="priority-badge low">"#));
        assert!(html.contains("💻 הזמנה אונליין"));
    }

    #[test]
    fn ids_are_escaped_only_in_markup() {
        let mut p = place();
        p.id = "a&\"b".into();
        p.website = "https://x.test".into();
        let html = render_card(&project(&p));
        assert!(html.contains(r#"data-action="edit" data-id="a&amp;&quot;b""#));
        assert!(html.contains(r#"href="https://x.test""#));

        let event = CardEvent::from_attributes("edit", "a&\"b").unwrap();
        assert_eq!(event, project(&p).events()[1]);
    }

    #[test]
    fn list_states_render_nothing() {
        assert_eq!(render_list(&ListView::Empty), None);
        assert_eq!(render_list(&ListView::NoResults), None);
        let html = render_list(&ListView::Cards(vec![project(&place())])).unwrap();
        assert!(html.starts_with(r#"<div class="place-card visited" data-id="p1">"#));
    }
}
