//! Query parameters for table reads
//!
//! Covers the small slice of the REST query language the site uses:
//! equality filters, ascending/descending order clauses, and a row limit.

/// Sort direction for an order clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn suffix(&self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// Builder for a table read
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, String)>,
    orders: Vec<(String, Order)>,
    limit: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equality filter on a column
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    /// Order clause; clauses apply in the order they are added
    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.orders.push((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render as URL query parameters (PostgREST conventions)
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }

        if !self.orders.is_empty() {
            let rendered = self
                .orders
                .iter()
                .map(|(column, direction)| format!("{column}.{}", direction.suffix()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), rendered));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_query_selects_all() {
        let params = Query::new().to_params();
        assert_eq!(params, vec![("select".to_string(), "*".to_string())]);
    }

    #[test]
    fn test_eq_filter_renders_postgrest_operator() {
        let params = Query::new().eq("page_key", "progetti/solista").to_params();
        assert!(params.contains(&("page_key".to_string(), "eq.progetti/solista".to_string())));
    }

    #[test]
    fn test_order_clauses_join_in_insertion_order() {
        let params = Query::new()
            .order("sort_order", Order::Ascending)
            .order("created_at", Order::Ascending)
            .to_params();
        assert!(params.contains(&(
            "order".to_string(),
            "sort_order.asc,created_at.asc".to_string()
        )));
    }

    #[test]
    fn test_descending_order_and_limit() {
        let params = Query::new()
            .order("created_at", Order::Descending)
            .limit(1)
            .to_params();
        assert!(params.contains(&("order".to_string(), "created_at.desc".to_string())));
        assert!(params.contains(&("limit".to_string(), "1".to_string())));
    }
}
