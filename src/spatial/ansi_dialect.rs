use crate::errors::internal::EpsgError;

/// Prefix carried by every default ANSI table name
pub const DEFAULT_PREFIX: &str = "epsg_";

/// Field name in the mapping; never schema-qualified
const AXIS_ORDER_FIELD: &str = "coord_axis_order";

/// MS-Access identifiers and their ANSI names, applied in this order
const ANSI_NAMES: [(&str, &str); 20] = [
    ("[Alias]", "epsg_alias"),
    ("[Area]", "epsg_area"),
    ("[Coordinate Axis]", "epsg_coordinateaxis"),
    ("[Coordinate Axis Name]", "epsg_coordinateaxisname"),
    ("[Coordinate_Operation]", "epsg_coordoperation"),
    ("[Coordinate_Operation Method]", "epsg_coordoperationmethod"),
    ("[Coordinate_Operation Parameter]", "epsg_coordoperationparam"),
    ("[Coordinate_Operation Parameter Usage]", "epsg_coordoperationparamusage"),
    ("[Coordinate_Operation Parameter Value]", "epsg_coordoperationparamvalue"),
    ("[Coordinate_Operation Path]", "epsg_coordoperationpath"),
    ("[Coordinate Reference System]", "epsg_coordinatereferencesystem"),
    ("[Coordinate System]", "epsg_coordinatesystem"),
    ("[Datum]", "epsg_datum"),
    ("[Ellipsoid]", "epsg_ellipsoid"),
    ("[Naming System]", "epsg_namingsystem"),
    ("[Prime Meridian]", "epsg_primemeridian"),
    ("[Supersession]", "epsg_supersession"),
    ("[Unit of Measure]", "epsg_unitofmeasure"),
    ("[Version History]", "epsg_versionhistory"),
    ("[ORDER]", AXIS_ORDER_FIELD),
];

/// Rewrites EPSG SQL written for the MS-Access schema into ANSI table names
///
/// Matching is case-sensitive and purely textual; the statement is not parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiDialect {
    mapping: Vec<(&'static str, String)>,
    prefix: String,
}

impl Default for AnsiDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiDialect {
    /// Default mapping with the `epsg_` prefix
    pub fn new() -> Self {
        Self {
            mapping: ANSI_NAMES
                .iter()
                .map(|(access, ansi)| (*access, ansi.to_string()))
                .collect(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Default mapping with every table qualified by `schema`
    ///
    /// See [`AnsiDialect::set_schema`] for how the schema is normalised.
    pub fn with_schema(schema: &str) -> Result<Self, EpsgError> {
        let mut dialect = Self::new();
        dialect.set_schema(schema)?;
        Ok(dialect)
    }

    /// Qualify every table name with `schema`
    ///
    /// The schema is trimmed; a `.` is appended unless it already ends in `.`
    /// or `_` (so `"myschema.epsg_"` keeps the `epsg_` part). Table names are
    /// rebuilt from the default names, so a later call replaces an earlier one.
    ///
    /// # Errors
    /// `InvalidSchema` when the schema is blank or only a separator
    pub fn set_schema(&mut self, schema: &str) -> Result<(), EpsgError> {
        let mut schema = schema.trim().to_string();

        match schema.chars().last() {
            None => return Err(EpsgError::InvalidSchema { schema }),
            Some('.') | Some('_') if schema.len() == 1 => {
                return Err(EpsgError::InvalidSchema { schema });
            }
            Some('.') | Some('_') => {}
            Some(_) => schema.push('.'),
        }

        for ((_, ansi), (_, default)) in self.mapping.iter_mut().zip(ANSI_NAMES.iter()) {
            *ansi = if *default == AXIS_ORDER_FIELD {
                default.to_string()
            } else {
                format!("{}{}", schema, default)
            };
        }

        tracing::debug!("EPSG tables qualified with '{}'", schema);
        self.prefix = schema;

        Ok(())
    }

    /// Replace every MS-Access identifier in `statement` by its ANSI name
    ///
    /// Entries apply in mapping order and the search resumes after each
    /// inserted name.
    pub fn adapt_sql(&self, statement: &str) -> String {
        let mut modified = statement.to_string();

        for (access, ansi) in &self.mapping {
            let mut start = 0;
            while let Some(found) = modified[start..].find(access) {
                let at = start + found;
                modified.replace_range(at..at + access.len(), ansi);
                start = at + ansi.len();
            }
        }

        modified
    }

    /// Current mapping in application order
    pub fn mapping(&self) -> &[(&'static str, String)] {
        &self.mapping
    }

    /// `epsg_` or the normalised schema
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
