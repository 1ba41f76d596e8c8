//! Relation definitions between entities.

/// One pair of columns that must agree across a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinColumns {
    /// Column on the owning entity's table.
    pub local: String,
    /// Column on the target entity's table.
    pub remote: String,
}

/// A foreign-key style relation from one entity to another.
///
/// A relation is written as a hop in a dotted expression, e.g. the `START_LEVEL`
/// in `GAMMA.START_LEVEL.ENERGY`. When the same physical table can be reached
/// twice from one entity (start and end level of a gamma), each relation carries
/// its own alias so both joins can coexist in one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDef {
    /// Relation name as written in expressions.
    pub name: String,
    /// Target entity name.
    pub target: String,
    /// Table alias used for the target table.
    pub alias: Option<String>,
    /// Column pairs joined by the relation.
    pub joins: Vec<JoinColumns>,
    /// Human readable description.
    pub description: String,
}

impl RelationDef {
    /// Create a relation to the given target entity.
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            alias: None,
            joins: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the alias for the target table.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Add a pair of joined columns.
    pub fn on(mut self, local: impl Into<String>, remote: impl Into<String>) -> Self {
        self.joins.push(JoinColumns {
            local: local.into(),
            remote: remote.into(),
        });
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Name that qualifies columns reached through this relation.
    pub fn qualifier<'a>(&'a self, target_table: &'a str) -> &'a str {
        self.alias.as_deref().unwrap_or(target_table)
    }

    /// Entry for the table clause, e.g. `levels as gam_lev_s`.
    pub fn table_entry(&self, target_table: &str) -> String {
        match &self.alias {
            Some(alias) => format!("{target_table} as {alias}"),
            None => target_table.to_string(),
        }
    }

    /// Join predicates for this relation when traversed from `owner`.
    pub fn predicates(&self, owner: &str, target_table: &str) -> Vec<String> {
        let qualifier = self.qualifier(target_table);
        self.joins
            .iter()
            .map(|j| format!("{owner}.{} = {qualifier}.{}", j.local, j.remote))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn start_level() -> RelationDef {
        RelationDef::new("START_LEVEL", "LEVEL")
            .with_alias("gam_lev_s")
            .on("l_seqno", "l_seqno")
            .on("nucid", "nucid")
    }

    #[test]
    fn test_aliased_relation() {
        let rel = start_level();
        assert_eq!(rel.qualifier("levels"), "gam_lev_s");
        assert_eq!(rel.table_entry("levels"), "levels as gam_lev_s");
        assert_eq!(
            rel.predicates("gammas", "levels"),
            vec![
                "gammas.l_seqno = gam_lev_s.l_seqno".to_string(),
                "gammas.nucid = gam_lev_s.nucid".to_string(),
            ]
        );
    }

    #[test]
    fn test_unaliased_relation() {
        let rel = RelationDef::new("NUC", "NUCLIDE").on("nucid", "nucid");
        assert_eq!(rel.table_entry("nuclides"), "nuclides");
        assert_eq!(
            rel.predicates("levels", "nuclides"),
            vec!["levels.nucid = nuclides.nucid".to_string()]
        );
    }
}
