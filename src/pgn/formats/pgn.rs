//! PGN exporter
//!
//!     The structural mirror of the line parser. [render_line] renders one line of move slots
//!     and recurses into every variation with no special casing per depth, so the mainline and
//!     a variation nested five levels deep go through the same code.
//!
//!     Per slot:
//!         `<n>.` white SAN, annotations, comment, white-origin variations, then the black half,
//!         prefixed with `<n>...` only when the slot has no white half, followed by its own
//!         annotations, comment and black-origin variations.
//!
//!     Annotations: a move-quality glyph (`!`, `?!`, ...) is glued to the SAN only when it is the
//!     first glyph of the half; every other glyph is written as a separate `$<code>` token. The
//!     parser reads glued suffixes first, so the glyph order survives a round trip. Leading
//!     variations are written before the slots, which is where the parser picks them up again.
//!
//!     Variations nested deeper than [MAX_VARIATION_DEPTH] are left out.

use super::options::ExportOptions;
use super::registry::{FormatError, Formatter};
use crate::pgn::ast::{
    AnnotationPosition, Color, Game, MoveSlot, Variation, MAX_VARIATION_DEPTH,
};
use crate::pgn::lexing::nag::{code_for_glyph, is_move_suffix};
use crate::pgn::parsing::headers::escape;

/// Tag pairs written first, in this order
const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

/// Render a full game: tag pairs, a blank line, then the movetext.
pub fn export_game(game: &Game, options: &ExportOptions) -> String {
    let mut out = String::new();

    if options.include_headers && !game.headers.is_empty() {
        let roster = SEVEN_TAG_ROSTER
            .iter()
            .filter_map(|key| game.headers.get_key_value(*key));
        let rest = game
            .headers
            .iter()
            .filter(|(key, _)| !SEVEN_TAG_ROSTER.contains(&key.as_str()));
        for (key, value) in roster.chain(rest) {
            out.push_str(&format!("[{} \"{}\"]\n", key, escape(value)));
        }
        out.push('\n');
    }

    let mut pieces = Vec::new();
    if options.include_comments {
        if let Some(comment) = &game.comment {
            push_comment(&mut pieces, comment);
        }
    }
    push_line(&mut pieces, &game.moves, options, &game.variations, 0);
    if let Some(result) = &game.result {
        pieces.push(result.clone());
    }

    let movetext = pieces.join(" ");
    out.push_str(wrap(&movetext, options.max_line_length).trim_end());
    out.push('\n');
    out
}

/// Render one line of slots, its leading variations first.
pub fn render_line(moves: &[MoveSlot], options: &ExportOptions, leading: &[Variation]) -> String {
    let mut pieces = Vec::new();
    push_line(&mut pieces, moves, options, leading, 0);
    pieces.join(" ")
}

fn push_line(
    pieces: &mut Vec<String>,
    moves: &[MoveSlot],
    options: &ExportOptions,
    leading: &[Variation],
    depth: usize,
) {
    if options.include_variations {
        for variation in leading {
            push_variation(pieces, variation, options, depth + 1);
        }
    }

    for slot in moves {
        if let Some(white) = &slot.white {
            pieces.push(format!("{}.", slot.number));
            push_half(pieces, slot, Color::White, white, options, depth);
        }
        if let Some(black) = &slot.black {
            if slot.white.is_none() {
                pieces.push(format!("{}...", slot.number));
            }
            push_half(pieces, slot, Color::Black, black, options, depth);
        }
    }
}

fn push_half(
    pieces: &mut Vec<String>,
    slot: &MoveSlot,
    color: Color,
    san: &str,
    options: &ExportOptions,
    depth: usize,
) {
    let mut move_text = san.to_string();
    let mut after = Vec::new();

    if options.include_annotations {
        for annotation in slot.annotations_for(color) {
            if annotation.position == AnnotationPosition::Before {
                pieces.push(numeric_glyph(&annotation.glyph));
            }
        }
        let glyphs = slot
            .annotations_for(color)
            .filter(|annotation| annotation.position == AnnotationPosition::After);
        for (index, annotation) in glyphs.enumerate() {
            if index == 0 && is_move_suffix(&annotation.glyph) {
                move_text.push_str(&annotation.glyph);
            } else {
                after.push(numeric_glyph(&annotation.glyph));
            }
        }
    }

    pieces.push(move_text);
    pieces.extend(after);

    if options.include_comments {
        if let Some(comment) = slot.comment(color) {
            push_comment(pieces, comment);
        }
    }
    if options.include_variations {
        for variation in slot.variations_for(color) {
            push_variation(pieces, variation, options, depth + 1);
        }
    }
}

fn push_variation(
    pieces: &mut Vec<String>,
    variation: &Variation,
    options: &ExportOptions,
    depth: usize,
) {
    if depth > MAX_VARIATION_DEPTH {
        tracing::warn!(
            depth,
            start = %variation.start(),
            "variation nested too deep, not exported"
        );
        return;
    }
    let mut inner = Vec::new();
    push_line(
        &mut inner,
        &variation.moves,
        options,
        &variation.leading_variations,
        depth,
    );
    pieces.push(format!("({})", inner.join(" ")));
    if options.include_comments {
        if let Some(comment) = &variation.comment {
            push_comment(pieces, comment);
        }
    }
}

fn push_comment(pieces: &mut Vec<String>, text: &str) {
    if text.is_empty() {
        return;
    }
    if braces_balanced(text) {
        pieces.push(format!("{{{}}}", text));
    } else {
        pieces.push(format!(";{}\n", text.replace('\n', " ")));
    }
}

fn braces_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for ch in text.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn numeric_glyph(glyph: &str) -> String {
    match code_for_glyph(glyph) {
        Some(code) => format!("${}", code),
        None => glyph.to_string(),
    }
}

/// Split movetext into wrap units: brace comments and `;` comments are never broken.
fn atoms(text: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut line_comment = false;

    for ch in text.chars() {
        if line_comment {
            if ch == '\n' {
                atoms.push(std::mem::take(&mut current));
                atoms.push("\n".to_string());
                line_comment = false;
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ';' if depth == 0 && current.is_empty() => {
                line_comment = true;
                current.push(ch);
            }
            ' ' | '\n' if depth == 0 => {
                if !current.is_empty() {
                    atoms.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        atoms.push(current);
    }
    atoms
}

fn wrap(text: &str, max: Option<usize>) -> String {
    let Some(max) = max.filter(|m| *m > 0) else {
        return text.to_string();
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for atom in atoms(text) {
        if atom == "\n" {
            lines.push(std::mem::take(&mut current));
            continue;
        }
        let width = current.chars().count();
        if width > 0 && width + 1 + atom.chars().count() > max {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&atom);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// PGN text output
#[derive(Debug, Clone, Default)]
pub struct PgnFormatter {
    pub options: ExportOptions,
}

impl PgnFormatter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }
}

impl Formatter for PgnFormatter {
    fn name(&self) -> &str {
        "pgn"
    }

    fn serialize(&self, game: &Game) -> Result<String, FormatError> {
        Ok(export_game(game, &self.options))
    }

    fn description(&self) -> &str {
        "PGN tag pairs and movetext"
    }
}
