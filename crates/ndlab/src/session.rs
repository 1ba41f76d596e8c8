//! The query session.

use crate::config::Config;
use crate::error::Error;
use crate::executor::{Executor, SqliteExecutor};
use crate::materialize::{materialize, FromRow};
use crate::model::{
    nuclide_filter, DecayGamma, DecayMode, DecayRadiation, FissionYield, Gamma, Level,
    LevelDecay, Nuclide, PhotonTotal, RadiationKind, YieldKind,
};
use ndlab_core::{Catalog, Row};
use ndlab_lang::Translator;
use std::cell::RefCell;
use tracing::{debug, info, warn};

/// A session over a nuclear-data store.
///
/// Translates field/filter expressions, runs them through an [`Executor`] and
/// materializes the rows into model instances.
pub struct Ndlab<E = SqliteExecutor> {
    executor: E,
    config: Config,
    last_sql: RefCell<Option<String>>,
}

impl Ndlab<SqliteExecutor> {
    /// Open the database named by the configuration.
    pub fn open(config: Config) -> Result<Self, Error> {
        let executor = SqliteExecutor::open(&config.db_path)?;
        Ok(Self::with_config(executor, config))
    }
}

impl<E: Executor> Ndlab<E> {
    /// Create a session with the default configuration.
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, Config::default())
    }

    /// Create a session with a configuration.
    pub fn with_config(executor: E, config: Config) -> Self {
        Self {
            executor,
            config,
            last_sql: RefCell::new(None),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The catalog expressions are resolved against.
    pub fn catalog(&self) -> &'static Catalog {
        Catalog::global()
    }

    /// SQL of the most recent execution.
    pub fn last_sql(&self) -> Option<String> {
        self.last_sql.borrow().clone()
    }

    fn translator(&self, force_clean: bool) -> Translator<'static> {
        Translator::new(Catalog::global()).with_force_clean(force_clean)
    }

    /// Whether the request has exactly one principal table.
    pub fn query_check(&self, fields: &str, filter: &str) -> bool {
        self.translator(self.config.force_clean).check(fields, filter)
    }

    /// SQL for the request without the principal-table check.
    pub fn query_build(&self, fields: &str, filter: &str) -> String {
        self.translator(self.config.force_clean)
            .build_unchecked(fields, filter)
            .to_sql()
    }

    /// Descriptions of the join rules the request fires, one per line.
    pub fn query_desc(&self, fields: &str, filter: &str) -> String {
        self.translator(self.config.force_clean)
            .describe(fields, filter)
            .join("\n")
    }

    /// SQL for the request, rejecting requests with several principal tables.
    pub fn query_sql(&self, fields: &str, filter: &str) -> Result<String, Error> {
        Ok(self
            .translator(self.config.force_clean)
            .assemble(fields, filter)?
            .to_sql())
    }

    /// Text description of an entity.
    pub fn describe(&self, entity: &str) -> Result<String, Error> {
        Ok(Catalog::global().describe(entity)?)
    }

    /// Run a request and return the raw rows.
    ///
    /// A failed execution is retried once with boundary cleanup forced,
    /// unless cleanup already ran or retries are disabled.
    pub fn query(&self, fields: &str, filter: &str) -> Result<Vec<Row>, Error> {
        let sql = self.query_sql(fields, filter)?;

        match self.run(&sql) {
            Ok(rows) => Ok(rows),
            Err(err) if self.config.retry && !self.config.force_clean => {
                warn!(error = %err, sql = %sql, "query failed, retrying with boundary cleanup");
                let sql = self.translator(true).assemble(fields, filter)?.to_sql();
                self.run(&sql).map_err(|err| Error::Execution {
                    sql,
                    message: err.to_string(),
                })
            }
            Err(err) => Err(Error::Execution {
                sql,
                message: err.to_string(),
            }),
        }
    }

    fn run(&self, sql: &str) -> Result<Vec<Row>, Error> {
        if self.config.print_sql {
            info!(sql, "executing");
        } else {
            debug!(sql, "executing");
        }
        *self.last_sql.borrow_mut() = Some(sql.to_string());

        let rows = self.executor.execute(sql)?;
        debug!(rows = rows.len(), "query complete");
        Ok(rows)
    }

    /// Instances of `T` matching the filter.
    pub fn fetch<T: FromRow>(&self, filter: &str) -> Result<Vec<T>, Error> {
        self.fetch_as(&format!("{}.*", T::ENTITY), filter)
    }

    /// Instances of `T` built from an explicit field list, such as
    /// `L_DECAY.DAUGHTER.ALL`.
    pub fn fetch_as<T: FromRow>(&self, fields: &str, filter: &str) -> Result<Vec<T>, Error> {
        let rows = self.query(fields, filter)?;
        Ok(materialize(&rows, filter))
    }

    /// The nuclide with the given identifier, e.g. `135XE`.
    pub fn nuclide(&self, nucid: &str) -> Result<Nuclide, Error> {
        let nucid = nucid.trim().to_uppercase();
        self.fetch::<Nuclide>(&nuclide_filter(&nucid))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found("NUCLIDE", nucid))
    }

    /// Nuclides matching the filter.
    pub fn nuclides(&self, filter: &str) -> Result<Vec<Nuclide>, Error> {
        self.fetch(filter)
    }

    /// Levels matching the filter.
    pub fn levels(&self, filter: &str) -> Result<Vec<Level>, Error> {
        self.fetch(filter)
    }

    /// Level gammas matching the filter.
    pub fn gammas(&self, filter: &str) -> Result<Vec<Gamma>, Error> {
        self.fetch(filter)
    }

    /// Level decays matching the filter.
    pub fn level_decays(&self, filter: &str) -> Result<Vec<LevelDecay>, Error> {
        self.fetch(filter)
    }

    /// Decay mode codes matching the filter.
    pub fn decay_modes(&self, filter: &str) -> Result<Vec<DecayMode>, Error> {
        self.fetch(filter)
    }

    /// Decay gammas matching the filter.
    pub fn decay_gammas(&self, filter: &str) -> Result<Vec<DecayGamma>, Error> {
        self.fetch(filter)
    }

    /// Photon totals matching the filter.
    pub fn photon_totals(&self, filter: &str) -> Result<Vec<PhotonTotal>, Error> {
        self.fetch(filter)
    }

    /// Decay radiations of one kind matching the filter.
    pub fn radiations(&self, kind: RadiationKind, filter: &str) -> Result<Vec<DecayRadiation>, Error> {
        let rows = self.query(&format!("{}.*", kind.entity()), filter)?;
        Ok(rows
            .iter()
            .map(|row| DecayRadiation::from_kind_row(kind, row, filter))
            .collect())
    }

    /// Fission yields of one kind matching the filter.
    pub fn fission_yields(&self, kind: YieldKind, filter: &str) -> Result<Vec<FissionYield>, Error> {
        let rows = self.query(&format!("{}.*", kind.entity()), filter)?;
        Ok(rows
            .iter()
            .map(|row| FissionYield::from_kind_row(kind, row, filter))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};

    /// Fails the first `failures` executions, then returns `rows`.
    struct Scripted {
        failures: Cell<usize>,
        rows: Vec<Row>,
        seen: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(failures: usize, rows: Vec<Row>) -> Self {
            Self {
                failures: Cell::new(failures),
                rows,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Executor for Scripted {
        fn execute(&self, sql: &str) -> Result<Vec<Row>, Error> {
            self.seen.borrow_mut().push(sql.to_string());
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(Error::Execution {
                    sql: sql.to_string(),
                    message: "near \"NUCLIDE\": syntax error".to_string(),
                });
            }
            Ok(self.rows.clone())
        }
    }

    fn xe135() -> Row {
        Row::new().with("z", 54).with("n", 81).with("nucid", "135XE")
    }

    #[test]
    fn test_query_returns_rows() {
        let db = Ndlab::new(Scripted::new(0, vec![xe135()]));
        let rows = db
            .query("NUCLIDE.Z NUCLIDE.N NUCLIDE.NUC_ID", "NUCLIDE.NUC_ID = '135XE'")
            .unwrap();

        assert_eq!(rows, vec![xe135()]);
        assert_eq!(
            db.last_sql().as_deref(),
            Some("select nuclides.z nuclides.n nuclides.nucid from nuclides where nuclides.nucid = '135XE'")
        );
    }

    #[test]
    fn test_ambiguous_request_never_executes() {
        let db = Ndlab::new(Scripted::new(0, vec![]));
        let result = db.query("NUCLIDE.Z LEVEL.ENERGY", "");

        assert!(matches!(result, Err(Error::Translate(_))));
        assert!(db.executor().seen.borrow().is_empty());
    }

    #[test]
    fn test_retry_once_with_cleanup() {
        let db = Ndlab::new(Scripted::new(1, vec![xe135()]));
        let rows = db.query("NUCLIDE.Z", "NUCLIDE.Z>50").unwrap();

        assert_eq!(rows.len(), 1);
        let seen = db.executor().seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].contains("nuclides.z >50"));
    }

    #[test]
    fn test_second_failure_is_terminal() {
        let db = Ndlab::new(Scripted::new(2, vec![]));
        let result = db.query("NUCLIDE.Z", "NUCLIDE.Z>50");

        assert!(matches!(result, Err(Error::Execution { .. })));
        assert_eq!(db.executor().seen.borrow().len(), 2);
    }

    #[test]
    fn test_no_retry_when_disabled() {
        let config = Config::default().with_retry(false);
        let db = Ndlab::with_config(Scripted::new(1, vec![]), config);

        assert!(db.query("NUCLIDE.Z", "").is_err());
        assert_eq!(db.executor().seen.borrow().len(), 1);
    }

    #[test]
    fn test_nuclide_not_found() {
        let db = Ndlab::new(Scripted::new(0, vec![]));
        let err = db.nuclide("999xx").unwrap_err();
        assert!(matches!(err, Error::NotFound { key, .. } if key == "999XX"));
    }

    #[test]
    fn test_diagnostics() {
        let db = Ndlab::new(Scripted::new(0, vec![]));

        assert!(db.query_check("LEVEL.ENERGY", "LEVEL.NUC.Z = 54"));
        assert!(!db.query_check("LEVEL.ENERGY NUCLIDE.Z", ""));
        assert!(db
            .query_build("LEVEL.ENERGY NUCLIDE.Z", "")
            .contains("nuclides.nucid = levels.nucid"));
        assert_eq!(
            db.query_desc("LEVEL.ENERGY NUCLIDE.Z", ""),
            "levels of the nuclide"
        );
        assert!(db.describe("LEVEL").unwrap().starts_with("LEVEL (levels)"));
        assert!(db.describe("NOPE").is_err());
    }
}
