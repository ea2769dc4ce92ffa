//! Binding: refno assignment and the global identifier table.
//!
//! [`BoundWorld::bind`] walks a [`WorldModel`] once, lays out the refno
//! space, gives every text literal in code an anonymous text refno, and
//! builds the case-insensitive identifier table. All problems found on the
//! way are collected and reported together as one
//! [`ErrorKind::LoadFailed`].

use std::collections::{HashMap, HashSet};

use gdesc_foundation::{Error, ErrorKind, Result, SourceLocation};

use crate::ast::Block;
use crate::builder::{DEFAULT_VARIABLES, INHAND, YLEM};
use crate::flags::FLAG_BITS;
use crate::grammar;
use crate::model::{
    ActionDecl, ArrayDecl, FlagCategory, GameInfo, ObjectDecl, PlaceDecl, ProcDecl, StateDecl,
    TextDecl, VariableDecl, VerbDecl, WorldModel,
};
use crate::refno::{Category, Refno, RefnoSpace};
use crate::visitor::{AstVisitor, walk_model};

/// What a global identifier names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identifier {
    /// Index into the object list.
    Object(usize),
    /// Index into the place list.
    Place(usize),
    /// Index into the variable list.
    Variable(usize),
    /// Index into the text list.
    Text(usize),
    /// Index into the verb list.
    Verb(usize),
    /// Index into the array list.
    Array(usize),
    /// Index into the proc list.
    Proc(usize),
    /// Index into the state list.
    State(usize),
    /// A named flag bit.
    Flag {
        /// Category the flag was declared for.
        category: FlagCategory,
        /// Bit position.
        bit: i32,
    },
}

impl Identifier {
    /// The entity category, for identifiers that carry a refno.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Object(_) => Some(Category::Object),
            Self::Place(_) => Some(Category::Place),
            Self::Variable(_) => Some(Category::Variable),
            Self::Text(_) => Some(Category::Text),
            Self::Verb(_) => Some(Category::Verb),
            _ => None,
        }
    }

    const fn entity_index(self) -> Option<usize> {
        match self {
            Self::Object(i) | Self::Place(i) | Self::Variable(i) | Self::Text(i) | Self::Verb(i) => {
                Some(i)
            }
            _ => None,
        }
    }
}

/// A borrowed view of the entity behind a refno.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    /// An object.
    Object(&'a ObjectDecl),
    /// A place.
    Place(&'a PlaceDecl),
    /// A variable.
    Variable(&'a VariableDecl),
    /// A named or anonymous text.
    Text(&'a TextDecl),
    /// A verb.
    Verb(&'a VerbDecl),
}

/// Refnos of the variables every world declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultRefnos {
    /// First word of player input.
    pub arg1: Refno,
    /// Second word of player input.
    pub arg2: Refno,
    /// Player status flags live on this variable.
    pub status: Refno,
    /// Current place.
    pub here: Refno,
    /// Previous place.
    pub there: Refno,
    /// The carried-objects place.
    pub inhand: Refno,
    /// The default object location.
    pub ylem: Refno,
}

/// A world model with refnos assigned and identifiers resolved.
#[derive(Clone, Debug)]
pub struct BoundWorld {
    model: WorldModel,
    space: RefnoSpace,
    texts: Vec<TextDecl>,
    identifiers: HashMap<String, Identifier>,
    literals: HashMap<String, Refno>,
    vocabulary: HashMap<String, Refno>,
    noise: HashSet<String>,
    actions: HashMap<usize, usize>,
    commands: HashMap<(Refno, usize), usize>,
    defaults: DefaultRefnos,
}

// =============================================================================
// Binding
// =============================================================================

#[derive(Default)]
struct LiteralCollector {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl AstVisitor for LiteralCollector {
    fn visit_text(&mut self, text: &str, _location: &SourceLocation) {
        if self.seen.insert(text.to_owned()) {
            self.ordered.push(text.to_owned());
        }
    }
}

struct Binder {
    identifiers: HashMap<String, Identifier>,
    errors: Vec<Error>,
}

impl Binder {
    fn declare(&mut self, name: &str, identifier: Identifier, location: &SourceLocation) {
        let key = name.to_lowercase();
        if self.identifiers.contains_key(&key) {
            self.errors
                .push(Error::duplicate_identifier(name).at(location));
        } else {
            self.identifiers.insert(key, identifier);
        }
    }

    fn invalid(&mut self, message: String, location: &SourceLocation) {
        self.errors
            .push(Error::new(ErrorKind::InvalidDeclaration(message)).at(location));
    }

    fn verb_index(&self, word: &str) -> Option<usize> {
        match self.identifiers.get(&word.to_lowercase()) {
            Some(Identifier::Verb(i)) => Some(*i),
            _ => None,
        }
    }

    fn entity_refno(&self, space: &RefnoSpace, name: &str) -> Option<Refno> {
        let identifier = *self.identifiers.get(name)?;
        Some(space.refno(identifier.category()?, identifier.entity_index()?))
    }
}

impl BoundWorld {
    /// Binds a world model.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::LoadFailed`] listing every duplicate identifier,
    /// proc that shadows a built-in, undeclared verb reference, and missing
    /// default element.
    pub fn bind(model: WorldModel) -> Result<Self> {
        let mut collector = LiteralCollector::default();
        walk_model(&mut collector, &model);

        let mut texts = model.texts.clone();
        let named_texts = texts.len();
        texts.extend(collector.ordered.iter().map(TextDecl::literal));

        let space = RefnoSpace::from_counts([
            model.objects.len(),
            model.places.len(),
            model.variables.len(),
            texts.len(),
            model.verbs.len(),
        ]);

        let literals = collector
            .ordered
            .into_iter()
            .enumerate()
            .map(|(i, text)| (text, space.refno(Category::Text, named_texts + i)))
            .collect();

        let mut binder = Binder {
            identifiers: HashMap::new(),
            errors: Vec::new(),
        };

        for (i, object) in model.objects.iter().enumerate() {
            binder.declare(&object.name, Identifier::Object(i), &object.location);
        }
        for (i, place) in model.places.iter().enumerate() {
            binder.declare(&place.name, Identifier::Place(i), &place.location);
        }
        for (i, variable) in model.variables.iter().enumerate() {
            binder.declare(&variable.name, Identifier::Variable(i), &variable.location);
        }
        for (i, text) in model.texts.iter().enumerate() {
            if text.alternatives.is_empty() {
                binder.invalid(
                    format!("text {} has no alternatives", text.name.as_deref().unwrap_or("?")),
                    &text.location,
                );
            }
            if let Some(name) = &text.name {
                binder.declare(name, Identifier::Text(i), &text.location);
            }
        }
        for (i, verb) in model.verbs.iter().enumerate() {
            for word in &verb.words {
                binder.declare(word, Identifier::Verb(i), &verb.location);
            }
        }
        for (i, array) in model.arrays.iter().enumerate() {
            binder.declare(&array.name, Identifier::Array(i), &array.location);
        }
        for (i, proc) in model.procs.iter().enumerate() {
            if grammar::is_builtin(&proc.name) {
                binder.invalid(
                    format!("proc {} has the name of a built-in", proc.name),
                    &proc.location,
                );
            }
            binder.declare(&proc.name, Identifier::Proc(i), &proc.location);
        }
        for (i, state) in model.states.iter().enumerate() {
            binder.declare(&state.name, Identifier::State(i), &state.location);
        }

        let mut next_bit: HashMap<FlagCategory, i32> = HashMap::new();
        for decl in &model.flags {
            for name in &decl.names {
                let bit = next_bit.entry(decl.category).or_insert(0);
                if u32::try_from(*bit).map_or(true, |b| b >= FLAG_BITS) {
                    binder.invalid(
                        format!("flag {name} exceeds {FLAG_BITS} flags for its category"),
                        &decl.location,
                    );
                }
                let flag = Identifier::Flag {
                    category: decl.category,
                    bit: *bit,
                };
                *bit += 1;
                binder.declare(name, flag, &decl.location);
            }
        }

        let mut actions = HashMap::new();
        for (i, action) in model.actions.iter().enumerate() {
            match binder.verb_index(&action.verb) {
                Some(verb) => {
                    actions.insert(verb, i);
                }
                None => binder.invalid(
                    format!("action for undeclared verb {}", action.verb),
                    &action.location,
                ),
            }
        }

        let mut commands = HashMap::new();
        let owners = model
            .objects
            .iter()
            .enumerate()
            .map(|(i, o)| (space.refno(Category::Object, i), &o.commands, &o.location))
            .chain(
                model
                    .places
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (space.refno(Category::Place, i), &p.commands, &p.location)),
            );
        for (owner, owned, location) in owners {
            for (i, command) in owned.iter().enumerate() {
                match binder.verb_index(&command.verb) {
                    Some(verb) => {
                        commands.entry((owner, verb)).or_insert(i);
                    }
                    None => binder.invalid(
                        format!("command for undeclared verb {}", command.verb),
                        location,
                    ),
                }
            }
        }

        let mut required = |name: &str, category: Category| -> Refno {
            match binder.entity_refno(&space, name) {
                Some(refno) if space.contains(category, refno) => refno,
                _ => {
                    binder.invalid(
                        format!("missing default {category} {name}"),
                        &SourceLocation::builtin(),
                    );
                    Refno::NONE
                }
            }
        };
        let [arg1, arg2, status, here, there] = DEFAULT_VARIABLES.map(|name| required(name, Category::Variable));
        let defaults = DefaultRefnos {
            arg1,
            arg2,
            status,
            here,
            there,
            inhand: required(INHAND, Category::Place),
            ylem: required(YLEM, Category::Place),
        };

        if !binder.errors.is_empty() {
            return Err(Error::new(ErrorKind::LoadFailed(binder.errors)));
        }

        let vocabulary = Self::build_vocabulary(&model, &space);
        let noise = model.noise.iter().map(|w| w.to_lowercase()).collect();

        Ok(Self {
            model,
            space,
            texts,
            identifiers: binder.identifiers,
            literals,
            vocabulary,
            noise,
            actions,
            commands,
            defaults,
        })
    }

    fn build_vocabulary(model: &WorldModel, space: &RefnoSpace) -> HashMap<String, Refno> {
        let mut vocabulary = HashMap::new();
        for (i, verb) in model.verbs.iter().enumerate() {
            let refno = space.refno(Category::Verb, i);
            for word in &verb.words {
                vocabulary.entry(word.to_lowercase()).or_insert(refno);
            }
        }
        for (i, place) in model.places.iter().enumerate() {
            let refno = space.refno(Category::Place, i);
            for word in std::iter::once(&place.name).chain(&place.words) {
                vocabulary.entry(word.to_lowercase()).or_insert(refno);
            }
        }
        for (i, object) in model.objects.iter().enumerate() {
            if !object.in_vocabulary {
                continue;
            }
            let refno = space.refno(Category::Object, i);
            for word in std::iter::once(&object.name).chain(&object.words) {
                vocabulary.entry(word.to_lowercase()).or_insert(refno);
            }
        }
        vocabulary
    }
}

// =============================================================================
// Lookups
// =============================================================================

impl BoundWorld {
    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &WorldModel {
        &self.model
    }

    /// Title banner data.
    #[must_use]
    pub fn info(&self) -> &GameInfo {
        &self.model.info
    }

    /// The refno layout.
    #[must_use]
    pub fn space(&self) -> &RefnoSpace {
        &self.space
    }

    /// Refnos of the default elements.
    #[must_use]
    pub fn defaults(&self) -> &DefaultRefnos {
        &self.defaults
    }

    /// Looks up a global identifier, ignoring case.
    #[must_use]
    pub fn identifier(&self, name: &str) -> Option<Identifier> {
        self.identifiers.get(&name.to_lowercase()).copied()
    }

    /// Refno of a named object, place, variable, text, or verb.
    #[must_use]
    pub fn refno_of(&self, name: &str) -> Option<Refno> {
        let identifier = self.identifier(name)?;
        Some(self.space.refno(identifier.category()?, identifier.entity_index()?))
    }

    /// Refno of the anonymous text created for a literal.
    #[must_use]
    pub fn literal(&self, text: &str) -> Option<Refno> {
        self.literals.get(text).copied()
    }

    /// Resolves a player word to its vocabulary refno.
    #[must_use]
    pub fn vocabulary(&self, word: &str) -> Option<Refno> {
        self.vocabulary.get(&word.to_lowercase()).copied()
    }

    /// Every vocabulary word, sorted.
    #[must_use]
    pub fn vocabulary_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.vocabulary.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Returns true for words dropped from player input.
    #[must_use]
    pub fn is_noise(&self, word: &str) -> bool {
        self.noise.contains(&word.to_lowercase())
    }

    /// The entity behind a refno.
    #[must_use]
    pub fn node(&self, refno: Refno) -> Option<Node<'_>> {
        let (category, index) = self.space.index_of(refno)?;
        match category {
            Category::Object => self.model.objects.get(index).map(Node::Object),
            Category::Place => self.model.places.get(index).map(Node::Place),
            Category::Variable => self.model.variables.get(index).map(Node::Variable),
            Category::Text => self.texts.get(index).map(Node::Text),
            Category::Verb => self.model.verbs.get(index).map(Node::Verb),
        }
    }

    /// Object at a refno.
    #[must_use]
    pub fn object(&self, refno: Refno) -> Option<&ObjectDecl> {
        let index = self.space.index_in(Category::Object, refno)?;
        self.model.objects.get(index)
    }

    /// Place at a refno.
    #[must_use]
    pub fn place(&self, refno: Refno) -> Option<&PlaceDecl> {
        let index = self.space.index_in(Category::Place, refno)?;
        self.model.places.get(index)
    }

    /// Text at a refno, named or anonymous.
    #[must_use]
    pub fn text(&self, refno: Refno) -> Option<&TextDecl> {
        let index = self.space.index_in(Category::Text, refno)?;
        self.texts.get(index)
    }

    /// Verb at a refno.
    #[must_use]
    pub fn verb(&self, refno: Refno) -> Option<&VerbDecl> {
        let index = self.space.index_in(Category::Verb, refno)?;
        self.model.verbs.get(index)
    }

    /// Number of texts, named plus anonymous.
    #[must_use]
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Procedure by index.
    #[must_use]
    pub fn proc(&self, index: usize) -> Option<&ProcDecl> {
        self.model.procs.get(index)
    }

    /// Array by index.
    #[must_use]
    pub fn array(&self, index: usize) -> Option<&ArrayDecl> {
        self.model.arrays.get(index)
    }

    /// State declarations in order.
    #[must_use]
    pub fn states(&self) -> &[StateDecl] {
        &self.model.states
    }

    /// The action registered for a verb refno.
    #[must_use]
    pub fn action(&self, verb: Refno) -> Option<&ActionDecl> {
        let verb = self.space.index_in(Category::Verb, verb)?;
        self.actions
            .get(&verb)
            .and_then(|&i| self.model.actions.get(i))
    }

    /// The command block an object or place runs for a verb refno.
    #[must_use]
    pub fn command(&self, owner: Refno, verb: Refno) -> Option<&Block> {
        let verb_index = self.space.index_in(Category::Verb, verb)?;
        let index = *self.commands.get(&(owner, verb_index))?;
        match self.node(owner)? {
            Node::Object(object) => object.commands.get(index).map(|c| &c.body),
            Node::Place(place) => place.commands.get(index).map(|c| &c.body),
            _ => None,
        }
    }

    /// Bit position of a named flag.
    #[must_use]
    pub fn flag_bit(&self, name: &str) -> Option<i32> {
        match self.identifier(name)? {
            Identifier::Flag { bit, .. } => Some(bit),
            _ => None,
        }
    }

    /// One-time blocks in declaration order.
    #[must_use]
    pub fn inits(&self) -> &[Block] {
        &self.model.inits
    }

    /// Per-turn blocks in declaration order.
    #[must_use]
    pub fn repeats(&self) -> &[Block] {
        &self.model.repeats
    }
}
