//! The translation pipeline: tokenizer, parser, join resolver, assembler.

use crate::assembler::{assemble, principal_tables, QueryPlan};
use crate::error::TranslateError;
use crate::join::JoinRules;
use crate::parser::{ParsedExpression, Parser};
use crate::span::map_to_source;
use crate::tokenizer::Tokenizer;
use ndlab_core::Catalog;
use tracing::debug;

/// Translates field and filter expressions into SQL.
///
/// # Example
///
/// ```
/// use ndlab_core::Catalog;
/// use ndlab_lang::Translator;
///
/// let translator = Translator::new(Catalog::global());
/// let plan = translator
///     .assemble("NUCLIDE.Z NUCLIDE.N", "NUCLIDE.NUC_ID = '135XE'")
///     .unwrap();
/// assert_eq!(
///     plan.to_sql(),
///     "select nuclides.z nuclides.n from nuclides where nuclides.nucid = '135XE'"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Translator<'c> {
    catalog: &'c Catalog,
    rules: JoinRules,
    force_clean: bool,
}

impl<'c> Translator<'c> {
    /// Create a translator with the nuclear-data join rules.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            rules: JoinRules::nuclear_data(),
            force_clean: false,
        }
    }

    /// Replace the join rules.
    pub fn with_rules(mut self, rules: JoinRules) -> Self {
        self.rules = rules;
        self
    }

    /// Run boundary cleanup before parsing.
    ///
    /// Diagnostic spans still index into the expression as given.
    pub fn with_force_clean(mut self, force_clean: bool) -> Self {
        self.force_clean = force_clean;
        self
    }

    /// The catalog in use.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Whether boundary cleanup runs before parsing.
    pub fn force_clean(&self) -> bool {
        self.force_clean
    }

    /// Insert whitespace around entity references.
    pub fn clean(&self, source: &str) -> String {
        Tokenizer::new(self.catalog).clean(source)
    }

    /// Parse one expression, cleaning it first when configured.
    pub fn parse(&self, source: &str) -> ParsedExpression {
        let parser = Parser::new(self.catalog);
        if !self.force_clean {
            return parser.parse(source);
        }

        let cleaned = self.clean(source);
        let mut parsed = parser.parse(&cleaned);
        for diagnostic in &mut parsed.diagnostics {
            if let Some(span) = map_to_source(&cleaned, source, diagnostic.span) {
                diagnostic.span = span;
            }
        }
        parsed
    }

    /// Principal tables of a request.
    pub fn principal_tables(&self, fields: &str, filter: &str) -> Vec<String> {
        principal_tables(&self.parse(fields), &self.parse(filter))
    }

    /// Whether a request names exactly one principal table.
    pub fn check(&self, fields: &str, filter: &str) -> bool {
        self.principal_tables(fields, filter).len() == 1
    }

    /// Assemble a request, rejecting it unless it has one principal table.
    pub fn assemble(&self, fields: &str, filter: &str) -> Result<QueryPlan, TranslateError> {
        let select = self.parse(fields);
        let condition = self.parse(filter);

        let tables = principal_tables(&select, &condition);
        if tables.len() != 1 {
            return Err(TranslateError::AmbiguousPrincipalTable { tables });
        }

        let plan = assemble(&select, &condition, &self.rules);
        debug!(sql = %plan, "assembled query");
        Ok(plan)
    }

    /// Assemble a request without the principal-table check.
    ///
    /// Requests over several tables are joined only by the join rules; the
    /// result may be a cross product.
    pub fn build_unchecked(&self, fields: &str, filter: &str) -> QueryPlan {
        let plan = assemble(&self.parse(fields), &self.parse(filter), &self.rules);
        debug!(sql = %plan, "assembled unchecked query");
        plan
    }

    /// Descriptions of the join rules a request fires.
    pub fn describe(&self, fields: &str, filter: &str) -> Vec<&'static str> {
        self.build_unchecked(fields, filter).rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assemble_simple() {
        let translator = Translator::new(Catalog::global());
        let sql = translator
            .assemble("NUCLIDE.Z NUCLIDE.N NUCLIDE.NUC_ID", "NUCLIDE.NUC_ID = '135XE'")
            .unwrap()
            .to_sql();

        assert_eq!(
            sql,
            "select nuclides.z nuclides.n nuclides.nucid from nuclides where nuclides.nucid = '135XE'"
        );
    }

    #[test]
    fn test_rejects_two_principal_tables() {
        let translator = Translator::new(Catalog::global());
        let err = translator
            .assemble("LEVEL.ENERGY", "NUCLIDE.Z = 54")
            .unwrap_err();

        assert_eq!(
            err,
            TranslateError::AmbiguousPrincipalTable {
                tables: vec!["levels".into(), "nuclides".into()]
            }
        );
        assert!(!translator.check("LEVEL.ENERGY", "NUCLIDE.Z = 54"));
    }

    #[test]
    fn test_rejects_no_principal_table() {
        let translator = Translator::new(Catalog::global());
        assert!(translator.assemble("1", "").is_err());
        assert!(!translator.check("", ""));
    }

    #[test]
    fn test_force_clean() {
        let plain = Translator::new(Catalog::global());
        let glued = plain.assemble("NUCLIDE.Z", "NUCLIDE.Z>50").unwrap();
        assert_eq!(glued.diagnostics.len(), 1);

        let cleaning = plain.clone().with_force_clean(true);
        let plan = cleaning.assemble("NUCLIDE.Z", "NUCLIDE.Z>50").unwrap();
        assert!(plan.diagnostics.is_empty());
        assert_eq!(plan.to_sql(), "select nuclides.z from nuclides where nuclides.z >50");
    }

    #[test]
    fn test_cleaned_diagnostic_points_into_source() {
        let translator = Translator::new(Catalog::global()).with_force_clean(true);
        let source = "NUCLIDE.Z>50 and    NUCLIDE.BOGUS = 1";
        let parsed = translator.parse(source);

        assert_eq!(parsed.diagnostics.len(), 1);
        let diagnostic = &parsed.diagnostics[0];
        assert_eq!(diagnostic.token, "NUCLIDE.BOGUS");
        assert_eq!(diagnostic.span.slice(source), Some("NUCLIDE.BOGUS"));
    }

    #[test]
    fn test_describe_unchecked() {
        let translator = Translator::new(Catalog::global());
        assert!(translator.describe("GAMMA.ENERGY", "").is_empty());
        assert_eq!(
            translator.describe("GAMMA.ENERGY", "NUCLIDE.Z = 54"),
            vec!["gammas of the nuclide"]
        );
    }
}
