use geodo_core::{Task, TaskLocation, UserLocation};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub fn render_tasks(tasks: &[Task]) -> String {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|t| TaskRow {
            id: t.id,
            done: if t.done { "✔" } else { "" },
            priority: t.priority.to_string(),
            title: truncate(&t.title, 40),
            description: truncate(&t.description, 50),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn render_location(loc: &TaskLocation) -> String {
    format!(
        "{}\n  {}\n  lat {:.6}, lon {:.6} (place {})",
        loc.name, loc.display_name, loc.lat, loc.lon, loc.place_id
    )
}

pub fn render_user_location(loc: &UserLocation) -> String {
    format!(
        "{} (you)\n  {}\n  lat {:.6}, lon {:.6}",
        loc.name, loc.display_name, loc.lat, loc.lon
    )
}

/// Cuts `s` to at most `max` terminal columns, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let limit = max.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > limit {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
