// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_pre_create::classifier::{is_pre_creatable, normalize_for_matching};

const DBT_CTAS: &str = r#"



  create table `jaffle_shop`.`customers__dbt_tmp`
    PROPERTIES (
      "replication_num" = "1"
    )
  as

with customers as (

    select * from `jaffle_shop`.`stg_customers`

),

orders as (

    select * from `jaffle_shop`.`stg_orders`

),

customer_orders as (

        select
        customer_id,

        min(order_date) as first_order,
        max(order_date) as most_recent_order,
        count(order_id) as number_of_orders
    from orders

    group by customer_id

)

select * from customer_orders"#;

#[test]
fn test_dbt_ctas_is_pre_creatable() {
    assert!(is_pre_creatable(DBT_CTAS));
}

#[test]
fn test_ctas_with_options_is_pre_creatable() {
    let sql = r#"create table if not exists `db`.`t__dbt_tmp`
        DISTRIBUTED BY (`key`)
        BUCKETS 5
        PROPERTIES ("foo" = "bar")
        as select * from `db`.`s`"#;
    assert!(is_pre_creatable(sql));
}

#[test]
fn test_catalog_select_is_not_pre_creatable() {
    let sql = r#"select
          null as "database",
          tbl.table_name as name,
          tbl.table_schema as "schema"
        from information_schema.tables tbl
        where tbl.table_schema = 'jaffle_shop'
        "#;
    assert!(!is_pre_creatable(sql));
}

#[test]
fn test_create_view_is_not_pre_creatable() {
    let sql = r#"create view `jaffle_shop`.`stg_customers__dbt_tmp` as

            with source as (

                select * from `jaffle_shop`.`raw_customers`

            )

            select * from source;
        "#;
    assert!(!is_pre_creatable(sql));
}

#[test]
fn test_rendered_view_is_not_pre_creatable() {
    let sql = r#"


      create view `jaffle_shop`.`stg_customers__dbt_backup` as WITH `source` (`id`) AS (SELECT `jaffle_shop`.`raw_customers`.`id`
FROM `jaffle_shop`.`raw_customers`) SELECT `source`.`id`
FROM `source`
        "#;
    assert!(!is_pre_creatable(sql));
}

#[test]
fn test_view_definition_lookup_is_not_pre_creatable() {
    let sql = "select VIEW_DEFINITION as sql from information_schema.views where TABLE_SCHEMA='jaffle_shop'";
    assert!(!is_pre_creatable(sql));
}

#[test]
fn test_drop_is_not_pre_creatable() {
    assert!(!is_pre_creatable("drop view if exists `jaffle_shop`.`stg_customers`"));
}

#[test]
fn test_alter_is_not_pre_creatable() {
    assert!(!is_pre_creatable(
        "       alter table `jaffle_shop`.`customers` rename customers__dbt_backup\n        "
    ));
}

#[test]
fn test_create_with_column_list_is_not_pre_creatable() {
    let sql = r#"create table `jaffle_shop`.`raw_payments` (
        `id` integer,
        `order_id` integer,
        `payment_method` string,
        `amount` integer
    ) ENGINE = OLAP
    PROPERTIES (
      "replication_num" = "1"
    )"#;
    assert!(!is_pre_creatable(sql));
}

#[test]
fn test_classification_is_idempotent() {
    for sql in [DBT_CTAS, "drop table x", ""] {
        assert_eq!(is_pre_creatable(sql), is_pre_creatable(sql));
    }
}

#[test]
fn test_normalization_is_stable() {
    let once = normalize_for_matching(DBT_CTAS);
    assert_eq!(normalize_for_matching(&once), once);
    assert!(once.starts_with("create table `jaffle_shop`.`customers__dbt_tmp`"));
}
