use super::descriptor::{OrderBy, StatementDescriptor};
use crate::action::{Action, Order};
use crate::condition::Condition;
use crate::config::{LogConfig, QbConfig};
use crate::error::{QbError, QbResult};
use crate::expr::{CompositeCondition, Expr};
use crate::sanitize::{InputKind, NoopSanitizer, PolicySanitizer, Sanitizer};
use crate::trace;

/// Lifecycle of a [`StatementBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderState {
    /// Nothing set yet.
    Empty,
    /// At least one setter succeeded; not built yet (or the last build failed).
    Configuring,
    /// A statement was produced. Call [`StatementBuilder::reset`] to reuse.
    Built,
}

/// Incrementally describes one statement and renders it.
///
/// Every table name, column name and value passes through the sanitizer
/// before it is stored. Setters are atomic: when one fails, nothing it was
/// given is recorded.
///
/// # Example
/// ```
/// use dbqb::{Action, Condition, Operator, Order, StatementBuilder};
///
/// let mut qb = StatementBuilder::new();
/// qb.set_table("Users")?
///     .set_action(Action::Select)?
///     .set_columns(["id", "name"])?
///     .add_condition(Condition::and("age", Operator::GreaterOrEqual, "18"))?
///     .set_order("name", Order::Ascending)?
///     .set_limit(10)?;
///
/// assert_eq!(
///     qb.build()?,
///     "select `id`, `name` from `Users` where `age`>='18' order by `name` asc limit 10"
/// );
/// # Ok::<(), dbqb::QbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StatementBuilder<S = NoopSanitizer> {
    sanitizer: S,
    log: LogConfig,
    descriptor: StatementDescriptor,
    state: BuilderState,
}

impl StatementBuilder<NoopSanitizer> {
    /// Create a builder that trusts its input.
    pub fn new() -> Self {
        Self::with_sanitizer(NoopSanitizer)
    }
}

impl Default for StatementBuilder<NoopSanitizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder<PolicySanitizer> {
    /// Create a builder with a [`PolicySanitizer`] and logging settings from
    /// `config`.
    pub fn from_config(config: &QbConfig) -> QbResult<Self> {
        let sanitizer = PolicySanitizer::new(&config.sanitizer)?;
        Ok(Self::with_sanitizer(sanitizer).with_log_config(config.logging.clone()))
    }
}

impl<S: Sanitizer> StatementBuilder<S> {
    /// Create a builder that routes input through `sanitizer`.
    pub fn with_sanitizer(sanitizer: S) -> Self {
        Self {
            sanitizer,
            log: LogConfig::default(),
            descriptor: StatementDescriptor::default(),
            state: BuilderState::Empty,
        }
    }

    /// Override the logging settings.
    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn descriptor(&self) -> &StatementDescriptor {
        &self.descriptor
    }

    pub fn sanitizer(&self) -> &S {
        &self.sanitizer
    }

    /// Discard everything set so far and return to [`BuilderState::Empty`].
    pub fn reset(&mut self) -> &mut Self {
        self.descriptor = StatementDescriptor::default();
        self.state = BuilderState::Empty;
        self
    }

    // ==================== Setters ====================

    /// Set the target table.
    pub fn set_table(&mut self, table: &str) -> QbResult<&mut Self> {
        self.ensure_open()?;
        let table = self.clean(table, InputKind::Table)?;
        self.descriptor.table = table;
        Ok(self.touched())
    }

    /// Set the action.
    pub fn set_action(&mut self, action: Action) -> QbResult<&mut Self> {
        self.ensure_open()?;
        self.descriptor.action = action;
        Ok(self.touched())
    }

    /// Replace the selected columns. An empty list selects `*`.
    pub fn set_columns<I, T>(&mut self, columns: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.ensure_open()?;
        let columns = columns
            .into_iter()
            .map(|c| self.clean(c.as_ref(), InputKind::Column))
            .collect::<QbResult<Vec<_>>>()?;
        self.descriptor.columns = columns;
        Ok(self.touched())
    }

    /// Bind `value` to `field` for INSERT/UPDATE.
    ///
    /// Setting the same field again replaces the value and keeps its position.
    pub fn set_field_value(&mut self, field: &str, value: &str) -> QbResult<&mut Self> {
        self.ensure_open()?;
        let field = self.clean(field, InputKind::Column)?;
        let value = self.clean(value, InputKind::Value)?;
        self.descriptor.field_values.set(field, value);
        Ok(self.touched())
    }

    /// Replace all field/value bindings at once.
    pub fn set_field_values<I, F, V>(&mut self, pairs: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = (F, V)>,
        F: AsRef<str>,
        V: AsRef<str>,
    {
        self.ensure_open()?;
        let pairs = pairs
            .into_iter()
            .map(|(f, v)| {
                Ok((
                    self.clean(f.as_ref(), InputKind::Column)?,
                    self.clean(v.as_ref(), InputKind::Value)?,
                ))
            })
            .collect::<QbResult<Vec<_>>>()?;
        self.descriptor.field_values = pairs.into_iter().collect();
        Ok(self.touched())
    }

    /// Append a predicate to the filter.
    pub fn add_condition(&mut self, condition: Condition) -> QbResult<&mut Self> {
        self.add_expr(condition)
    }

    /// Append a parenthesised group built from `members`.
    ///
    /// Fails with `InvalidArgument` if `members` is empty.
    pub fn add_composite_condition<I, E>(&mut self, members: I) -> QbResult<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.ensure_open()?;
        let group = CompositeCondition::new(members)?;
        self.add_expr(group)
    }

    /// Append a leaf or group, at any nesting depth.
    pub fn add_expr(&mut self, expr: impl Into<Expr>) -> QbResult<&mut Self> {
        self.ensure_open()?;
        let expr: Expr = expr.into();
        let expr = expr.try_map_text(&mut |raw: &str, kind| self.clean(raw, kind))?;
        self.descriptor.filter.push(expr);
        Ok(self.touched())
    }

    /// Set the `order by` column and direction.
    pub fn set_order(&mut self, field: &str, direction: Order) -> QbResult<&mut Self> {
        self.ensure_open()?;
        let field = self.clean(field, InputKind::Column)?;
        self.descriptor.order = Some(OrderBy { field, direction });
        Ok(self.touched())
    }

    /// Set the maximum number of affected rows.
    pub fn set_limit(&mut self, limit: u64) -> QbResult<&mut Self> {
        self.ensure_open()?;
        self.descriptor.limit = Some(limit);
        Ok(self.touched())
    }

    // ==================== Build ====================

    /// Render the statement.
    ///
    /// On success the builder moves to [`BuilderState::Built`]. On failure
    /// its state and descriptor are unchanged, so the caller can fix the
    /// missing part and build again.
    pub fn build(&mut self) -> QbResult<String> {
        self.ensure_open()?;
        let action = self.descriptor.action;
        match self.descriptor.render() {
            Ok(sql) => {
                let conditions = self.descriptor.filter.leaf_count();
                trace::statement_built(&self.log, action, conditions, &sql);
                self.state = BuilderState::Built;
                Ok(sql)
            }
            Err(err) => {
                trace::build_failed(&self.log, action, &err);
                Err(err)
            }
        }
    }

    fn ensure_open(&self) -> QbResult<()> {
        if self.state == BuilderState::Built {
            return Err(QbError::AlreadyBuilt);
        }
        Ok(())
    }

    fn touched(&mut self) -> &mut Self {
        self.state = BuilderState::Configuring;
        self
    }

    fn clean(&self, raw: &str, kind: InputKind) -> QbResult<String> {
        self.sanitizer
            .sanitize(raw, kind)
            .inspect_err(|err| trace::input_rejected(&self.log, kind, err))
    }
}
