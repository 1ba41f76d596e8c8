//! SQL assembly from parsed select and filter expressions.

use crate::error::Diagnostic;
use crate::join::JoinRules;
use crate::parser::{push_unique, ParsedExpression};

/// Keywords that start a trailing clause rather than a condition.
const TRAILING_KEYWORDS: &[&[&str]] = &[&["order", "by"], &["group", "by"], &["having"]];

/// A fully assembled query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    /// Rendered select list.
    pub select: String,
    /// Table entries, aliases included.
    pub tables: Vec<String>,
    /// Relation, entity and rule predicates.
    pub predicates: Vec<String>,
    /// The filter's own condition.
    pub condition: String,
    /// `ORDER BY`, `GROUP BY` or `HAVING` clause from the filter.
    pub trailing: String,
    /// Descriptions of the join rules that fired.
    pub rules: Vec<&'static str>,
    /// Tokens that did not resolve in either expression.
    pub diagnostics: Vec<Diagnostic>,
}

impl QueryPlan {
    /// Render the plan as SQL text.
    pub fn to_sql(&self) -> String {
        let mut sql = format!("select {} from {}", self.select, self.tables.join(", "));

        let mut clauses = self.predicates.clone();
        if !self.condition.is_empty() {
            if !clauses.is_empty() && has_disjunction(&self.condition) {
                clauses.push(format!("({})", self.condition));
            } else {
                clauses.push(self.condition.clone());
            }
        }
        if !clauses.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&clauses.join(" and "));
        }

        if !self.trailing.is_empty() {
            sql.push(' ');
            sql.push_str(&self.trailing);
        }

        sql
    }
}

impl std::fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

/// Root tables of both expressions, without duplicates.
pub fn principal_tables(select: &ParsedExpression, filter: &ParsedExpression) -> Vec<String> {
    let mut tables = select.principal_tables.clone();
    for table in &filter.principal_tables {
        push_unique(&mut tables, table.clone());
    }
    tables
}

/// Combine parsed expressions into a plan. Does not check principal tables.
pub fn assemble(select: &ParsedExpression, filter: &ParsedExpression, rules: &JoinRules) -> QueryPlan {
    let mut tables = select.tables.clone();
    let mut predicates = select.predicates.clone();
    for table in &filter.tables {
        push_unique(&mut tables, table.clone());
    }
    for predicate in &filter.predicates {
        push_unique(&mut predicates, predicate.clone());
    }

    let fired = rules.applicable(&tables);
    for rule in &fired {
        for predicate in rule.predicates {
            push_unique(&mut predicates, predicate.to_string());
        }
    }

    let (condition, trailing) = split_trailing(&filter.fragments);

    QueryPlan {
        select: select.text(),
        tables,
        predicates,
        condition,
        trailing,
        rules: fired.iter().map(|rule| rule.description).collect(),
        diagnostics: select
            .diagnostics
            .iter()
            .chain(&filter.diagnostics)
            .cloned()
            .collect(),
    }
}

/// Split filter fragments at the first trailing-clause keyword.
fn split_trailing(fragments: &[String]) -> (String, String) {
    let at = (0..fragments.len()).find(|&i| {
        TRAILING_KEYWORDS.iter().any(|keyword| {
            keyword.iter().enumerate().all(|(offset, word)| {
                fragments
                    .get(i + offset)
                    .is_some_and(|fragment| fragment.eq_ignore_ascii_case(word))
            })
        })
    });

    match at {
        Some(i) => (fragments[..i].join(" "), fragments[i..].join(" ")),
        None => (fragments.join(" "), String::new()),
    }
}

fn has_disjunction(condition: &str) -> bool {
    condition
        .split_whitespace()
        .any(|word| word.eq_ignore_ascii_case("or"))
}
