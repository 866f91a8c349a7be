//! Emission options.

use serde::Deserialize ;



/// Knobs controlling the shape of emitted text.
///
/// Read from the `[options]` table of a manifest; every field has a default.
#[derive( Debug, Clone, PartialEq, Eq, Deserialize )]
#[serde( default, rename_all = "kebab-case", deny_unknown_fields )]
pub struct GeneratorOptions {
    /// Spaces per indentation level. Ignored when `use-tabs` is set.
    pub indent_width: usize,
    pub use_tabs: bool,
    /// Emit `#nullable enable` after the header.
    pub nullable: bool,
    /// Wrap each contract's forwarding members in a `#region`.
    pub regions: bool,
    /// Emit the `// <auto-generated>` header.
    pub header: bool,
    /// Prefix of generated field names.
    pub field_prefix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            use_tabs: false,
            nullable: true,
            regions: true,
            header: true,
            field_prefix: "_".to_string(),
        }
    }
}

impl GeneratorOptions {

    /// The string written once per indentation level.
    pub fn indent_unit( &self ) -> String {
        match self.use_tabs {
            true => "\t".to_string(),
            false => " ".repeat( self.indent_width ),
        }
    }

    pub fn with_field_prefix( mut self, prefix: impl Into<String> ) -> Self {
        self.field_prefix = prefix.into();
        self
    }

    pub fn with_tabs( mut self ) -> Self {
        self.use_tabs = true ;
        self
    }

    /// Options producing only the declarations: no header, nullable line or regions.
    pub fn bare() -> Self {
        Self { nullable: false, regions: false, header: false, ..Self::default() }
    }

}
