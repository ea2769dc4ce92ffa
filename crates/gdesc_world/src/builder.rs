//! Fluent construction of world models.
//!
//! [`WorldBuilder::new`] seeds every world with the default elements the
//! runtime relies on: the `badword`, `ambigword`, and `badsyntax` states,
//! the `arg1`, `arg2`, `status`, `here`, and `there` variables, and the
//! `inhand` and `ylem` places. Everything added afterwards follows them in
//! declaration order.

use gdesc_foundation::SourceLocation;

use crate::ast::{Block, Expr};
use crate::model::{
    ActionCode, ActionDecl, ArrayDecl, Command, FlagCategory, FlagDecl, GameInfo, ObjectDecl,
    PlaceDecl, ProcDecl, StateDecl, TextDecl, TextMethod, VariableDecl, VerbDecl, WorldModel,
};

/// Variables every world declares.
pub const DEFAULT_VARIABLES: [&str; 5] = ["arg1", "arg2", "status", "here", "there"];

/// The carried-objects place; always the first place.
pub const INHAND: &str = "inhand";

/// The default object location; always the second place.
pub const YLEM: &str = "ylem";

/// States every world declares, with their values.
pub const DEFAULT_STATES: [(&str, i32); 3] = [("badword", -2), ("ambigword", -3), ("badsyntax", -1)];

impl ObjectDecl {
    /// Creates an object with the same text for every description.
    #[must_use]
    pub fn new(name: impl Into<String>, brief: impl Into<String>) -> Self {
        let brief = brief.into();
        Self {
            name: name.into(),
            words: Vec::new(),
            in_vocabulary: true,
            inventory: brief.clone(),
            brief,
            long: None,
            commands: Vec::new(),
            location: SourceLocation::builtin(),
        }
    }

    /// Sets the carried description.
    #[must_use]
    pub fn with_inventory(mut self, text: impl Into<String>) -> Self {
        self.inventory = text.into();
        self
    }

    /// Sets the first-sight description.
    #[must_use]
    pub fn with_long(mut self, text: impl Into<String>) -> Self {
        self.long = Some(text.into());
        self
    }

    /// Adds player words for this object.
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Keeps the object out of the player's vocabulary.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.in_vocabulary = false;
        self
    }

    /// Adds a per-verb command.
    #[must_use]
    pub fn with_command(mut self, verb: impl Into<String>, body: Block) -> Self {
        self.commands.push(Command {
            verb: verb.into(),
            body,
        });
        self
    }

    /// Sets the declaration site.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl PlaceDecl {
    /// Creates a place with only a brief description.
    #[must_use]
    pub fn new(name: impl Into<String>, brief: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words: Vec::new(),
            brief: brief.into(),
            long: None,
            commands: Vec::new(),
            location: SourceLocation::builtin(),
        }
    }

    /// Sets the first-visit description.
    #[must_use]
    pub fn with_long(mut self, text: impl Into<String>) -> Self {
        self.long = Some(text.into());
        self
    }

    /// Adds extra vocabulary words for this place.
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Adds a per-verb command.
    #[must_use]
    pub fn with_command(mut self, verb: impl Into<String>, body: Block) -> Self {
        self.commands.push(Command {
            verb: verb.into(),
            body,
        });
        self
    }

    /// Sets the declaration site.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

/// Builds a [`WorldModel`] one declaration at a time.
#[derive(Clone, Debug)]
pub struct WorldBuilder {
    model: WorldModel,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldBuilder {
    /// Starts a world containing only the default elements.
    #[must_use]
    pub fn new() -> Self {
        let mut model = WorldModel::default();
        for (name, value) in DEFAULT_STATES {
            model.states.push(StateDecl {
                name: name.to_owned(),
                value: Some(Expr::int(value)),
                location: SourceLocation::builtin(),
            });
        }
        for name in DEFAULT_VARIABLES {
            model.variables.push(VariableDecl {
                name: name.to_owned(),
                location: SourceLocation::builtin(),
            });
        }
        model
            .places
            .push(PlaceDecl::new(INHAND, "inventory").with_long("Inventory"));
        model.places.push(PlaceDecl::new(YLEM, "ylem").with_long("Ylem"));
        Self { model }
    }

    /// Sets the title banner data.
    #[must_use]
    pub fn info(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        self.model.info = GameInfo {
            name: name.into(),
            version: version.into(),
            author: author.into(),
            date: date.into(),
        };
        self
    }

    /// Adds noise words dropped from player input.
    #[must_use]
    pub fn noise<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model.noise.extend(words.into_iter().map(Into::into));
        self
    }

    /// Adds an object.
    #[must_use]
    pub fn object(mut self, object: ObjectDecl) -> Self {
        self.model.objects.push(object);
        self
    }

    /// Adds a place.
    #[must_use]
    pub fn place(mut self, place: PlaceDecl) -> Self {
        self.model.places.push(place);
        self
    }

    /// Adds a variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>) -> Self {
        self.model.variables.push(VariableDecl {
            name: name.into(),
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Adds an array of `size` zeroed cells.
    #[must_use]
    pub fn array(mut self, name: impl Into<String>, size: usize) -> Self {
        self.model.arrays.push(ArrayDecl {
            name: name.into(),
            size,
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Adds a single-alternative named text.
    #[must_use]
    pub fn text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts(name, [text], None)
    }

    /// Adds a named text with several alternatives.
    #[must_use]
    pub fn texts<I, S>(mut self, name: impl Into<String>, alternatives: I, method: Option<TextMethod>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model.texts.push(TextDecl {
            name: Some(name.into()),
            alternatives: alternatives.into_iter().map(Into::into).collect(),
            method,
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Adds a verb; the first word is canonical.
    #[must_use]
    pub fn verb<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model.verbs.push(VerbDecl {
            words: words.into_iter().map(Into::into).collect(),
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Declares named flag bits for a category.
    #[must_use]
    pub fn flags<I, S>(mut self, category: FlagCategory, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model.flags.push(FlagDecl {
            category,
            names: names.into_iter().map(Into::into).collect(),
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Adds an action block for `verb`, appending to any earlier blocks for
    /// the same verb.
    #[must_use]
    pub fn action(mut self, verb: impl Into<String>, arg2: Option<&str>, body: Block) -> Self {
        let verb = verb.into();
        let code = ActionCode {
            arg2: arg2.map(str::to_owned),
            body,
        };
        if let Some(action) = self.model.actions.iter_mut().find(|a| a.verb == verb) {
            action.codes.push(code);
        } else {
            self.model.actions.push(ActionDecl {
                verb,
                codes: vec![code],
                location: SourceLocation::builtin(),
            });
        }
        self
    }

    /// Adds a procedure.
    #[must_use]
    pub fn proc<I, S>(mut self, name: impl Into<String>, params: I, body: Block) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model.procs.push(ProcDecl {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            body,
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Adds a one-time block.
    #[must_use]
    pub fn init(mut self, body: Block) -> Self {
        self.model.inits.push(body);
        self
    }

    /// Adds a per-turn block.
    #[must_use]
    pub fn repeat(mut self, body: Block) -> Self {
        self.model.repeats.push(body);
        self
    }

    /// Adds a state, with an optional explicit value.
    #[must_use]
    pub fn state(mut self, name: impl Into<String>, value: Option<Expr>) -> Self {
        self.model.states.push(StateDecl {
            name: name.into(),
            value,
            location: SourceLocation::builtin(),
        });
        self
    }

    /// Finishes the model.
    #[must_use]
    pub fn build(self) -> WorldModel {
        self.model
    }
}
