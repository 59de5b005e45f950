pub mod transform_json_to_sql;
