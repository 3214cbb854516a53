#[macro_export]
macro_rules! log_err {
    // Usage: log_err!(&state.pool, "records.update", params);
    ($pool:expr, $what:expr, $params:expr) => {{
        let pool_clone = $pool.clone();
        let location = format!("{}:{}", file!(), line!());

        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::log::error!(target: "newsdesk", "{} failed at {location}", $what);

        ::tokio::spawn(async move {
            let _ = ::sqlx::query(
                r#"
                    INSERT INTO error_logs (location, parameters)
                    VALUES ($1, $2)
                    "#,
            )
            .bind(location)
            .bind(params_json)
            .execute(&pool_clone)
            .await;
        });
    }};
}
