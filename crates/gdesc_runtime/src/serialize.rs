//! Saving and loading world models as `MessagePack`.
//!
//! A front end compiles game source once; the resulting [`WorldModel`] can
//! then be stored and run without re-parsing.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use gdesc_foundation::{Error, ErrorKind, Result};
use gdesc_world::WorldModel;

/// Encodes a world model with named fields.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn to_bytes(model: &WorldModel) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(model).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Decodes a world model.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid encoded model.
pub fn from_bytes(bytes: &[u8]) -> Result<WorldModel> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Writes a world model to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or encoding fails.
pub fn save_to_file<P: AsRef<Path>>(model: &WorldModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(model)?;
    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to write to file '{}': {e}",
                path.display()
            )))
        })
}

/// Reads a world model from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<WorldModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to open file '{}': {e}",
            path.display()
        )))
    })?;

    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;

    from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdesc_world::{
        AssignOp, Block, Expr, ObjectDecl, PlaceDecl, Stmt, TextMethod, WorldBuilder,
    };

    fn sample() -> WorldModel {
        WorldBuilder::new()
            .info("Cellar", "1.0", "Someone", "today")
            .noise(["the", "a"])
            .place(PlaceDecl::new("cellar", "A damp cellar.").with_words(["cellar"]))
            .object(ObjectDecl::new("lamp", "A brass lamp.").with_words(["lamp"]))
            .variable("score")
            .texts("greeting", ["Hi.", "Hello."], Some(TextMethod::Cycle))
            .verb(["take", "get"])
            .init(Block::new(vec![Stmt::expr(Expr::assign(
                AssignOp::Assign,
                Expr::ident("score"),
                Expr::int(5),
            ))]))
            .build()
    }

    #[test]
    fn bytes_preserve_the_model() {
        let model = sample();
        let bytes = to_bytes(&model).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), model);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("gdesc_serialize_{}.msgpack", std::process::id()));
        let model = sample();
        save_to_file(&model, &path).unwrap();
        let loaded = load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), model);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_from_file("/nonexistent/gdesc/world.msgpack").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(ref msg) if msg.contains("failed to open file")));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let err = from_bytes(&[0xc1, 0x00, 0xff]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Serialization(_)));
    }
}
