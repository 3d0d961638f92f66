//! Event query builder using SeaQuery.
//!
//! Generates the count, page, and export SQL from one EventFilter. All
//! three share a single predicate construction path, so the listing, its
//! total, and the CSV export can never disagree on which events match.

use sea_query::{
    Asterisk, Expr, ExprTrait, Iden, Order, Query, SelectStatement, SqliteQueryBuilder,
};

use super::types::{EventFilter, Page};

/// Identifier for the event table and its columns.
#[derive(Iden)]
enum Events {
    #[iden = "event"]
    Table,
    Id,
    Ts,
    Label,
    Description,
    X,
    Y,
    Source,
}

/// Query builder for filtered event reads.
pub struct EventQueryBuilder {
    filter: EventFilter,
}

impl EventQueryBuilder {
    /// Create a new query builder for the given filter.
    pub fn new(filter: EventFilter) -> Self {
        Self { filter }
    }

    /// Build the paginated SELECT query.
    pub fn build_page(&self, page: &Page) -> String {
        let mut query = self.base_select();

        query.limit(page.limit as u64);
        query.offset(page.offset as u64);

        query.to_string(SqliteQueryBuilder)
    }

    /// Build the unbounded SELECT query for export. Identical to the
    /// page query minus LIMIT/OFFSET.
    pub fn build_export(&self) -> String {
        self.base_select().to_string(SqliteQueryBuilder)
    }

    /// Build a COUNT query for total results. No ordering or pagination
    /// is applied.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query.expr(Expr::col(Asterisk).count());
        query.from(Events::Table);

        self.add_filters(&mut query);

        query.to_string(SqliteQueryBuilder)
    }

    /// The filtered, ordered SELECT shared by page and export.
    fn base_select(&self) -> SelectStatement {
        let mut query = Query::select();

        query.columns([
            Events::Id,
            Events::Ts,
            Events::Label,
            Events::Description,
            Events::X,
            Events::Y,
            Events::Source,
        ]);
        query.from(Events::Table);

        self.add_filters(&mut query);

        // Newest first; id breaks timestamp ties so pagination is stable
        query.order_by(Events::Ts, Order::Desc);
        query.order_by(Events::Id, Order::Desc);

        query
    }

    /// Add WHERE conditions for every supplied bound. All bounds are
    /// inclusive and conjoined; a NULL coordinate on a constrained axis
    /// fails the comparison and is excluded.
    fn add_filters(&self, query: &mut SelectStatement) {
        if let Some(start) = self.filter.start {
            query.and_where(Expr::col(Events::Ts).gte(start.timestamp_micros()));
        }

        if let Some(end) = self.filter.end {
            query.and_where(Expr::col(Events::Ts).lte(end.timestamp_micros()));
        }

        if let Some(ref label) = self.filter.label {
            query.and_where(Expr::col(Events::Label).eq(label.as_str()));
        }

        if let Some(min_x) = self.filter.min_x {
            query.and_where(Expr::col(Events::X).gte(min_x));
        }

        if let Some(max_x) = self.filter.max_x {
            query.and_where(Expr::col(Events::X).lte(max_x));
        }

        if let Some(min_y) = self.filter.min_y {
            query.and_where(Expr::col(Events::Y).gte(min_y));
        }

        if let Some(max_y) = self.filter.max_y {
            query.and_where(Expr::col(Events::Y).lte(max_y));
        }
    }
}
