//! Prompt construction for the star-schema warehouse.
//!
//! The schema is fixed: five dimension tables around one sales fact table.
//! The prompt instructs the model to reply with a single `{"sql": "..."}`
//! dictionary and lists the operations the safety gate will reject.

/// The warehouse schema presented to the model, as Postgres DDL.
const WAREHOUSE_SCHEMA: &str = r#"-- Product Dimension
product_dim(
    product_id uuid PRIMARY KEY,
    product_name text NOT NULL,
    category text,
    brand text,
    supplier text,
    cost_price numeric(10,2)
)

-- Employee Dimension
employee_dim(
    employee_id uuid PRIMARY KEY,
    first_name text NOT NULL,
    last_name text NOT NULL,
    role text,
    hire_date date,
    department text
)

-- Store Dimension
store_dim(
    store_id uuid PRIMARY KEY,
    store_name text NOT NULL,
    location text,
    region text,
    manager_id uuid REFERENCES employee_dim(employee_id)
)

-- Customer Dimension
customer_dim(
    customer_id uuid PRIMARY KEY,
    first_name text,
    last_name text,
    email text,
    phone text,
    city text,
    country text
)

-- Date Dimension
date_dim(
    date_id date PRIMARY KEY,
    year int,
    month int,
    day int,
    quarter int,
    weekday int
)

-- Sales Fact Table
sales_fact(
    sale_id uuid PRIMARY KEY,
    date_id date REFERENCES date_dim(date_id),
    product_id uuid REFERENCES product_dim(product_id),
    employee_id uuid REFERENCES employee_dim(employee_id),
    store_id uuid REFERENCES store_dim(store_id),
    customer_id uuid REFERENCES customer_dim(customer_id),
    quantity int,
    unit_price numeric(10,2),
    discount numeric(5,2),
    total_amount numeric(12,2)
)"#;

/// Build the full synthesis prompt for a user question.
pub fn build_sql_prompt(question: &str) -> String {
    format!(
        r#"You are an AI specialized in generating SQL queries for a PostgreSQL data warehouse.

Return ONLY a dictionary with:
{{
  "sql": "<SQL ... ;>"
}}

SQL RULES:
- Allowed operations: SELECT, JOIN (INNER, LEFT, RIGHT, FULL, CROSS),
                     WITH (CTEs), UNION, UNION ALL, INTERSECT, EXCEPT,
                     CASE WHEN, COALESCE, NULLIF, CAST, :: (type casting),
                     Window Functions (ROW_NUMBER, RANK, SUM OVER, etc.),
                     Aggregations (COUNT, SUM, AVG, MIN, MAX, STRING_AGG, ARRAY_AGG)
- MUST end with semicolon (;)
- Use LIMIT for performance when appropriate
- FORBIDDEN: DELETE, INSERT, UPDATE, CREATE, DROP, TRUNCATE, ALTER, GRANT, REVOKE
- Use standard PostgreSQL syntax

DATABASE SCHEMA:
{schema}

BEST PRACTICES:
1. Always JOIN dimension tables to get readable names (not UUIDs)
2. Use date_dim for time-based queries
3. Add LIMIT for performance when exploring data
4. Use appropriate aggregations
5. Handle NULL values with COALESCE
6. Use aliases for clear column names

EXAMPLE QUERY:
  SELECT p.product_name, SUM(s.total_amount) as total_sales
  FROM sales_fact s
  JOIN product_dim p ON s.product_id = p.product_id
  GROUP BY p.product_name
  ORDER BY total_sales DESC
  LIMIT 10;

--------------------------------------------
TASK
--------------------------------------------
User Question: "{question}"

Generate a SAFE read-only SQL query and return ONLY the dictionary:

{{
  "sql": "<SQL ... ;>"
}}

Remember: avoid DELETE, INSERT, UPDATE, CREATE, DROP, TRUNCATE, ALTER, GRANT, REVOKE operations."#,
        schema = WAREHOUSE_SCHEMA,
        question = question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_question() {
        let prompt = build_sql_prompt("top 5 products by total sales");
        assert!(prompt.contains("User Question: \"top 5 products by total sales\""));
    }

    #[test]
    fn test_prompt_lists_schema_tables() {
        let prompt = build_sql_prompt("anything");
        for table in [
            "product_dim",
            "employee_dim",
            "store_dim",
            "customer_dim",
            "date_dim",
            "sales_fact",
        ] {
            assert!(prompt.contains(table), "missing table {}", table);
        }
    }

    #[test]
    fn test_prompt_lists_forbidden_keywords() {
        let prompt = build_sql_prompt("anything");
        for keyword in querybi_core::FORBIDDEN_KEYWORDS {
            assert!(prompt.contains(keyword), "missing keyword {}", keyword);
        }
    }
}
