use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::errors::internal::EpsgError;
use crate::spatial::AnsiDialect;

/// Dialect for an optional schema
pub fn dialect_for(schema: Option<&str>) -> Result<AnsiDialect, EpsgError> {
    match schema {
        Some(schema) => AnsiDialect::with_schema(schema),
        None => Ok(AnsiDialect::new()),
    }
}

/// Read a whole script and rewrite it
pub fn adapt_reader(dialect: &AnsiDialect, mut reader: impl Read) -> io::Result<String> {
    let mut script = String::new();
    reader.read_to_string(&mut script)?;
    Ok(dialect.adapt_sql(&script))
}

/// Rewrite an EPSG script from `input` (or stdin) to stdout
pub fn adapt_script(schema: Option<&str>, input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dialect = dialect_for(schema)?;

    let adapted = match input {
        Some(path) => {
            tracing::info!("Adapting EPSG script {}", path.display());
            adapt_reader(&dialect, File::open(path)?)?
        }
        None => adapt_reader(&dialect, io::stdin().lock())?,
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(adapted.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_for_schema() {
        assert_eq!(dialect_for(None).unwrap().prefix(), "epsg_");
        assert_eq!(dialect_for(Some("gis")).unwrap().prefix(), "gis.");
        assert!(dialect_for(Some(" ")).is_err());
    }

    #[test]
    fn test_adapt_reader() {
        let dialect = dialect_for(Some("gis")).unwrap();
        let script = "INSERT INTO [Datum] VALUES (6326);\nINSERT INTO [Ellipsoid] VALUES (7030);\n";

        let adapted = adapt_reader(&dialect, script.as_bytes()).unwrap();

        assert_eq!(
            adapted,
            "INSERT INTO gis.epsg_datum VALUES (6326);\nINSERT INTO gis.epsg_ellipsoid VALUES (7030);\n"
        );
    }
}
