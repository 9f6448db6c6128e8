//! Sequence diagram fallback renderer.
//!
//! Understands both mermaid messages (`A->>B: hi`) and the diagon-style
//! shorthand (`A -> B: hi`). Draws actor boxes over vertical lifelines
//! with labeled horizontal arrows between them.

use lazy_static::lazy_static;
use regex::Regex;

use super::canvas::{
    canvas_to_string, clamp_width, draw_hline, draw_label_box, draw_text, mk_canvas, set_char,
};
use super::code_frame;

lazy_static! {
    static ref RE_ACTOR: Regex =
        Regex::new(r"(?i)^(?:participant|actor)\s+(\S+?)(?:\s+as\s+(.+))?$").unwrap();
    static ref RE_MSG: Regex =
        Regex::new(r"^(\S+?)\s*(-->>|->>|-->|->)\s*(\S+?)\s*:\s*(.*)$").unwrap();
}

/// Bounded element counts keep the output finite for any input
const MAX_ACTORS: usize = 6;
const MAX_MESSAGES: usize = 12;

const ACTOR_BOX_H: usize = 3;

struct Actor {
    label: String,
}

struct Message {
    from: usize,
    to: usize,
    label: String,
    dashed: bool,
}

struct SequenceSketch {
    actors: Vec<Actor>,
    ids: Vec<String>,
    messages: Vec<Message>,
}

impl SequenceSketch {
    fn actor_index(&mut self, id: &str) -> Option<usize> {
        if let Some(i) = self.ids.iter().position(|a| a == id) {
            return Some(i);
        }
        if self.actors.len() >= MAX_ACTORS {
            return None;
        }
        self.ids.push(id.to_string());
        self.actors.push(Actor {
            label: id.to_string(),
        });
        Some(self.actors.len() - 1)
    }
}

fn parse(source: &str) -> SequenceSketch {
    let mut sketch = SequenceSketch {
        actors: Vec::new(),
        ids: Vec::new(),
        messages: Vec::new(),
    };

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.to_lowercase().starts_with("sequencediagram") {
            continue;
        }

        if let Some(caps) = RE_ACTOR.captures(line) {
            let id = caps[1].to_string();
            if !sketch.ids.contains(&id) && sketch.actors.len() < MAX_ACTORS {
                let label = caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_else(|| id.clone());
                sketch.ids.push(id);
                sketch.actors.push(Actor { label });
            }
            continue;
        }

        if sketch.messages.len() >= MAX_MESSAGES {
            break;
        }
        if let Some(caps) = RE_MSG.captures(line) {
            let dashed = caps[2].starts_with("--");
            let (from, to) = (caps[1].to_string(), caps[3].to_string());
            let label = caps[4].trim().to_string();
            let (Some(fi), Some(ti)) = (
                sketch.actor_index(&from),
                sketch.actor_index(&to),
            ) else {
                continue;
            };
            sketch.messages.push(Message {
                from: fi,
                to: ti,
                label,
                dashed,
            });
        }
    }

    sketch
}

/// Render sequence diagram source to box-drawn text, bounded to `width`
/// columns. Degrades to a framed dump when no actors are found.
pub fn render(source: &str, width: usize) -> String {
    let sketch = parse(source);
    if sketch.actors.is_empty() {
        return code_frame(source, "sequence", width);
    }

    // Lifeline x positions: boxes must not overlap and message labels
    // must fit between the lifelines they span
    let box_widths: Vec<usize> = sketch
        .actors
        .iter()
        .map(|a| a.label.chars().count() + 4)
        .collect();
    let half_box: Vec<usize> = box_widths.iter().map(|w| (w + 1) / 2).collect();

    let mut adj_max: Vec<usize> = vec![0; sketch.actors.len().saturating_sub(1)];
    for msg in &sketch.messages {
        if msg.from == msg.to {
            continue;
        }
        let lo = msg.from.min(msg.to);
        let hi = msg.from.max(msg.to);
        let needed = msg.label.chars().count() + 4;
        let per_gap = needed.div_ceil(hi - lo);
        for g in lo..hi {
            adj_max[g] = adj_max[g].max(per_gap);
        }
    }

    let mut ll_x: Vec<usize> = vec![half_box[0]];
    for i in 1..sketch.actors.len() {
        let gap = (half_box[i - 1] + half_box[i] + 2)
            .max(adj_max[i - 1] + 2)
            .max(10);
        ll_x.push(ll_x[i - 1] + gap);
    }

    // Vertical positions: one blank row, then label row, then arrow row
    // per message; self-messages take a 3-row loop instead
    let mut arrow_y: Vec<usize> = Vec::new();
    let mut cur_y = ACTOR_BOX_H;
    for msg in &sketch.messages {
        cur_y += 1;
        if msg.from == msg.to {
            arrow_y.push(cur_y);
            cur_y += 3;
        } else {
            arrow_y.push(cur_y + 1);
            cur_y += 2;
        }
    }
    let footer_y = cur_y + 1;

    let total_w = ll_x.last().copied().unwrap_or(0) + half_box.last().copied().unwrap_or(0) + 2;
    let mut canvas = mk_canvas(total_w, footer_y + ACTOR_BOX_H);

    // Actor boxes top and bottom, lifeline between
    for (i, actor) in sketch.actors.iter().enumerate() {
        let cx = ll_x[i] as i32;
        let w = box_widths[i] as i32;
        draw_label_box(&mut canvas, cx, 0, w, &actor.label);
        draw_label_box(&mut canvas, cx, footer_y as i32, w, &actor.label);
        for y in ACTOR_BOX_H..footer_y {
            set_char(&mut canvas, cx, y as i32, '│');
        }
    }

    for (m, msg) in sketch.messages.iter().enumerate() {
        let y = arrow_y[m] as i32;
        let from_x = ll_x[msg.from] as i32;
        let to_x = ll_x[msg.to] as i32;

        if msg.from == msg.to {
            // Self-message: out to the right, down, back with an arrow
            set_char(&mut canvas, from_x, y, '├');
            draw_hline(&mut canvas, from_x + 1, from_x + 3, y, '─');
            set_char(&mut canvas, from_x + 4, y, '┐');
            set_char(&mut canvas, from_x + 4, y + 1, '│');
            set_char(&mut canvas, from_x, y + 2, '◄');
            draw_hline(&mut canvas, from_x + 1, from_x + 3, y + 2, '─');
            set_char(&mut canvas, from_x + 4, y + 2, '┘');
            draw_text(&mut canvas, from_x + 6, y + 1, &msg.label);
            continue;
        }

        let line_char = if msg.dashed { '╌' } else { '─' };
        let (start_x, end_x) = if msg.to > msg.from {
            (from_x + 1, to_x - 1)
        } else {
            (to_x + 1, from_x - 1)
        };
        draw_hline(&mut canvas, start_x, end_x, y, line_char);
        let head = if msg.to > msg.from { '►' } else { '◄' };
        set_char(&mut canvas, to_x, y, head);

        let label_x = (from_x + to_x) / 2 - (msg.label.chars().count() as i32) / 2;
        draw_text(&mut canvas, label_x, y - 1, &msg.label);
    }

    clamp_width(&canvas_to_string(&canvas), width)
}
