//! Text rendering and template expansion.
//!
//! Templates are expanded in a single pass:
//!
//! | Syntax        | Expands to                                             |
//! |---------------|--------------------------------------------------------|
//! | `\c`          | `c`, literally                                         |
//! | `$`           | the qualifier's numeric value                          |
//! | `#`           | the name of the entity the qualifier refers to         |
//! | `{ident}`     | the text value of `ident`, itself expanded             |
//! | `[a/b/=/c]`   | the alternative picked by the qualifier, expanded      |
//!
//! Without a qualifier `$` and `#` are kept as-is and `[...]` picks its first
//! alternative. In an alternative list `=` repeats the previous alternative.

use gdesc_foundation::{Error, ErrorKind, Result};
use gdesc_world::{Category, Node, Refno, TextDecl, TextMethod};
use rand::Rng;

use crate::console::Console;
use crate::engine::Engine;

/// How much of an entity's description to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detail {
    /// Just the name.
    Name,
    /// Long description on first sight, brief afterwards.
    Default,
    /// Long description whenever there is one.
    Long,
}

impl<C: Console> Engine<C> {
    /// Expands a template against an optional qualifier.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedTemplate`] for an unterminated `{` or
    /// `[`, [`ErrorKind::LimitExceeded`] if expansions nest too deeply, and
    /// any fault raised while looking up `{ident}` references.
    pub fn expand(&mut self, template: &str, qualifier: Option<i32>) -> Result<String> {
        self.expand_at(template, qualifier, 0)
    }

    fn expand_at(&mut self, template: &str, qualifier: Option<i32>, depth: usize) -> Result<String> {
        if depth > self.config.max_text_depth {
            return Err(Error::new(ErrorKind::LimitExceeded(format!(
                "text nesting {}",
                self.config.max_text_depth
            ))));
        }
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '$' => match qualifier {
                    Some(q) => out.push_str(&q.to_string()),
                    None => out.push('$'),
                },
                '#' => match qualifier {
                    Some(q) => out.push_str(&self.render(q, Detail::Name, None)?),
                    None => out.push('#'),
                },
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('\\') => {
                                if let Some(escaped) = chars.next() {
                                    name.push(escaped);
                                }
                            }
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(Error::malformed_template(format!(
                                    "unterminated '{{' in \"{template}\""
                                )));
                            }
                        }
                    }
                    let name = name.trim().to_lowercase();
                    let value = self.text_value(&name, qualifier)?;
                    out.push_str(&self.expand_at(&value, qualifier, depth + 1)?);
                }
                '[' => {
                    let alternatives = split_alternatives(&mut chars).ok_or_else(|| {
                        Error::malformed_template(format!("unterminated '[' in \"{template}\""))
                    })?;
                    let index = qualifier.map_or(0, |q| {
                        usize::try_from(q).unwrap_or(0).min(alternatives.len() - 1)
                    });
                    let chosen = alternatives.get(index).cloned().unwrap_or_default();
                    out.push_str(&self.expand_at(&chosen, qualifier, depth + 1)?);
                }
                other => out.push(other),
            }
        }
        Ok(out)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Renders an entity by refno.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRefno`] if `refno` names no entity.
    pub fn render(&mut self, refno: i32, detail: Detail, qualifier: Option<i32>) -> Result<String> {
        let world = std::sync::Arc::clone(&self.world);
        let target = Refno::new(refno);
        let node = world.node(target).ok_or_else(|| Error::invalid_refno(refno))?;
        Ok(match node {
            Node::Object(object) => {
                if detail == Detail::Name {
                    return Ok(object.name.clone());
                }
                if self.state.location(target) == Some(world.defaults().inhand) {
                    return Ok(object.inventory.clone());
                }
                let seen = self
                    .flag_bit("seen")
                    .is_some_and(|bit| self.state.test_flag(target, bit));
                match &object.long {
                    Some(long) if !seen || detail == Detail::Long => long.clone(),
                    _ => object.brief.clone(),
                }
            }
            Node::Place(place) => {
                if detail == Detail::Name {
                    return Ok(place.name.clone());
                }
                let visited = match self.flag_bit("beenhere") {
                    Some(bit) => {
                        let visited = self.state.test_flag(target, bit);
                        self.state.set_flag(target, bit);
                        visited
                    }
                    None => false,
                };
                match &place.long {
                    Some(long) if !visited || detail == Detail::Long => long.clone(),
                    _ => place.brief.clone(),
                }
            }
            Node::Variable(_) => self.default_var(target).to_string(),
            Node::Text(text) => {
                let index = world.space().index_in(Category::Text, target).unwrap_or(0);
                self.select_alternative(index, text, qualifier, detail != Detail::Name)
            }
            Node::Verb(verb) => verb.name().to_string(),
        })
    }

    /// Renders a value that may or may not be a refno; plain numbers print as themselves.
    pub(crate) fn render_value(
        &mut self,
        value: i32,
        detail: Detail,
        qualifier: Option<i32>,
    ) -> Result<String> {
        if self.world.space().category_of(Refno::new(value)).is_some() {
            self.render(value, detail, qualifier)
        } else {
            Ok(value.to_string())
        }
    }

    /// The unexpanded text an identifier stands for. The qualifier picks the
    /// alternative of an assigned-method text.
    pub(crate) fn text_value(&mut self, name: &str, qualifier: Option<i32>) -> Result<String> {
        if let Some(local) = self.scopes.get(name) {
            return self.render_value(local.as_int(), Detail::Default, qualifier);
        }
        let identifier = self
            .world
            .identifier(name)
            .ok_or_else(|| Error::undefined_identifier(name))?;
        match (identifier.category(), self.world.refno_of(name)) {
            (Some(_), Some(refno)) => self.render(refno.get(), Detail::Default, qualifier),
            _ => Ok(self.ident_value(name)?.to_string()),
        }
    }

    /// Picks an alternative. Without `advance` the increment and cycle
    /// cursors stay put and a random text yields its first alternative.
    fn select_alternative(
        &mut self,
        index: usize,
        text: &TextDecl,
        qualifier: Option<i32>,
        advance: bool,
    ) -> String {
        let count = text.alternatives.len();
        if count <= 1 {
            return text.alternatives.first().cloned().unwrap_or_default();
        }
        let chosen = match text.method {
            None => 0,
            Some(TextMethod::Increment) => {
                let cursor = self.state.text_cursor(index).min(count - 1);
                if advance {
                    self.state.set_text_cursor(index, (cursor + 1).min(count - 1));
                }
                cursor
            }
            Some(TextMethod::Cycle) => {
                let cursor = self.state.text_cursor(index) % count;
                if advance {
                    self.state.set_text_cursor(index, (cursor + 1) % count);
                }
                cursor
            }
            Some(TextMethod::Random) if advance => self.rng.gen_range(0..count),
            Some(TextMethod::Random) => 0,
            Some(TextMethod::Assigned) => {
                qualifier.map_or(0, |q| usize::try_from(q).unwrap_or(0).min(count - 1))
            }
        };
        text.alternatives.get(chosen).cloned().unwrap_or_default()
    }
}

/// Reads the body of a `[...]` after its opening bracket.
///
/// Splits on top-level `/`, resolves `=` to the previous alternative, and
/// keeps escapes intact for the recursive expansion. Returns `None` if the
/// closing bracket is missing.
fn split_alternatives(chars: &mut std::str::Chars<'_>) -> Option<Vec<String>> {
    let mut alternatives: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut nesting = 0usize;
    loop {
        let c = chars.next()?;
        match c {
            '\\' => {
                current.push(c);
                current.push(chars.next()?);
            }
            '[' => {
                nesting += 1;
                current.push(c);
            }
            ']' if nesting > 0 => {
                nesting -= 1;
                current.push(c);
            }
            ']' | '/' if nesting == 0 => {
                let resolved = if current == "=" {
                    alternatives.last().cloned().unwrap_or_default()
                } else {
                    std::mem::take(&mut current)
                };
                current.clear();
                alternatives.push(resolved);
                if c == ']' {
                    return Some(alternatives);
                }
            }
            _ => current.push(c),
        }
    }
}
