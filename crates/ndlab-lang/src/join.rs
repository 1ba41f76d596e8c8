//! Implicit join rules between principal tables.
//!
//! When a request references two tables that are not linked through a
//! relation path, a rule for that pair supplies the join predicates. Rules
//! are keyed by an unordered pair of exact table entries.

/// Predicates to add when both tables of a pair are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRule {
    /// The two table entries, in either order.
    pub tables: (&'static str, &'static str),
    /// Predicates contributed by the rule.
    pub predicates: &'static [&'static str],
    /// What the join means.
    pub description: &'static str,
}

impl JoinRule {
    /// Whether the rule links tables `a` and `b`, in either order.
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.tables.0 == a && self.tables.1 == b) || (self.tables.0 == b && self.tables.1 == a)
    }

    /// Whether both tables of the rule occur in `tables`.
    pub fn applies_to(&self, tables: &[String]) -> bool {
        tables.iter().any(|t| t == self.tables.0) && tables.iter().any(|t| t == self.tables.1)
    }
}

/// Rules for the nuclear-data tables.
pub const NUCLEAR_RULES: &[JoinRule] = &[
    JoinRule {
        tables: ("levels", "nuclides"),
        predicates: &["nuclides.nucid = levels.nucid"],
        description: "levels of the nuclide",
    },
    JoinRule {
        tables: ("dr_gammas", "nuclides"),
        predicates: &["nuclides.nucid = dr_gammas.parent_nucid"],
        description: "decay gammas emitted by the parent nuclide",
    },
    JoinRule {
        tables: ("gammas", "nuclides"),
        predicates: &["nuclides.nucid = gammas.nucid"],
        description: "gammas of the nuclide",
    },
    JoinRule {
        tables: ("gammas", "levels"),
        predicates: &[
            "levels.nucid = gammas.nucid",
            "levels.l_seqno = gammas.l_seqno",
        ],
        description: "gammas de-exciting the level",
    },
    JoinRule {
        tables: ("gammas", "l_decays"),
        predicates: &["l_decays.nucid = gammas.nucid"],
        description: "gammas of the decaying nuclide",
    },
    JoinRule {
        tables: ("gammas", "decay_radiations"),
        predicates: &[
            "decay_radiations.daughter_nucid = gammas.nucid",
            "decay_radiations.adopted_daughter_l_seqno = gammas.l_seqno",
        ],
        description: "gammas de-exciting the level fed by the radiation",
    },
    JoinRule {
        tables: ("cum_fy", "dr_gammas"),
        predicates: &["cum_fy.daughter_nucid = dr_gammas.parent_nucid"],
        description: "decay gammas of a cumulative fission product",
    },
];

/// An ordered set of join rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRules {
    rules: Vec<JoinRule>,
}

impl JoinRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The rules for the nuclear-data tables.
    pub fn nuclear_data() -> Self {
        Self {
            rules: NUCLEAR_RULES.to_vec(),
        }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: JoinRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rule linking two tables, if any.
    pub fn find(&self, a: &str, b: &str) -> Option<&JoinRule> {
        self.rules.iter().find(|rule| rule.links(a, b))
    }

    /// Every rule whose table pair occurs in `tables`, in rule order.
    pub fn applicable(&self, tables: &[String]) -> Vec<&JoinRule> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(tables))
            .collect()
    }

    /// All rules.
    pub fn rules(&self) -> &[JoinRule] {
        &self.rules
    }
}

impl Default for JoinRules {
    fn default() -> Self {
        Self::nuclear_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_find_is_symmetric() {
        let rules = JoinRules::nuclear_data();
        let forward = rules.find("levels", "gammas").map(|r| r.predicates);
        let backward = rules.find("gammas", "levels").map(|r| r.predicates);

        assert_eq!(forward, backward);
        assert_eq!(forward.map(|p| p.len()), Some(2));
        assert!(rules.find("levels", "cum_fy").is_none());
    }

    #[test]
    fn test_applicable_requires_exact_entries() {
        let rules = JoinRules::nuclear_data();

        let fired = rules.applicable(&tables(&["gammas", "levels as gam_lev_s"]));
        assert!(fired.is_empty());

        let fired = rules.applicable(&tables(&["gammas", "nuclides", "levels"]));
        let pairs: Vec<_> = fired.iter().map(|r| r.tables).collect();
        assert_eq!(
            pairs,
            vec![
                ("levels", "nuclides"),
                ("gammas", "nuclides"),
                ("gammas", "levels")
            ]
        );
    }

    #[test]
    fn test_rule_pairs_are_unique() {
        for (i, rule) in NUCLEAR_RULES.iter().enumerate() {
            for other in &NUCLEAR_RULES[i + 1..] {
                assert!(!rule.links(other.tables.0, other.tables.1));
            }
        }
    }

    #[test]
    fn test_custom_rules() {
        let rules = JoinRules::new().with_rule(JoinRule {
            tables: ("a", "b"),
            predicates: &["a.id = b.a_id"],
            description: "test",
        });
        assert_eq!(rules.rules().len(), 1);
        assert!(rules.find("b", "a").is_some());
    }
}
