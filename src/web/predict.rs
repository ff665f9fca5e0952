use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::math::vector::Vector;
use crate::prelude::*;
use crate::trainer::regression::LinearRegression;
use crate::web::rejection::Rejection;

#[derive(Serialize)]
pub struct Prediction {
    pub prediction: f64,
}

#[handler]
#[instrument(level = "info", skip_all)]
pub async fn predict(
    Json(record): Json<Map<String, Value>>,
    Data(model): Data<&Arc<LinearRegression>>,
) -> Result<Response> {
    let row = match feature_row(&model.feature_names, &record) {
        Ok(row) => row,
        Err(error) => {
            info!(keys = ?record.keys().collect::<Vec<_>>(), "{:#}", error);
            return Ok(Rejection::new(format!("{:#}", error))
                .with_status(StatusCode::UNPROCESSABLE_ENTITY));
        }
    };
    let prediction = model.predict(&row)?;
    ensure!(prediction.is_finite(), "the prediction is not finite: {}", prediction);
    debug!(prediction);
    Ok(Json(Prediction { prediction }).into_response())
}

/// Picks the features out of the posted record by name.
///
/// Every feature must be present as a JSON number, and unknown keys are rejected.
fn feature_row(feature_names: &[String], record: &Map<String, Value>) -> Result<Vector> {
    if let Some(unknown) = record
        .keys()
        .find(|key| !feature_names.iter().any(|name| name == *key))
    {
        bail!("unknown feature `{}`", unknown);
    }
    feature_names
        .iter()
        .map(|name| match record.get(name) {
            Some(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| anyhow!("feature `{}` is not representable as a float", name)),
            Some(value) => Err(anyhow!("feature `{}` must be a number, got `{}`", name, value)),
            None => Err(anyhow!("missing feature `{}`", name)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::web::test::{create_test_client, read_json};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn names() -> Vec<String> {
        vec!["income".to_string(), "expense".to_string()]
    }

    #[test]
    fn feature_row_any_key_order_ok() -> Result {
        let row = feature_row(&names(), &object(json!({"expense": 2000, "income": 4000.5})))?;
        assert_eq!(row, [4000.5, 2000.0]);
        Ok(())
    }

    #[test]
    fn feature_row_missing_error() {
        let error = feature_row(&names(), &object(json!({"income": 4000}))).unwrap_err();
        assert_eq!(error.to_string(), "missing feature `expense`");
    }

    #[test]
    fn feature_row_wrong_type_error() {
        let record = object(json!({"income": "4000", "expense": 2000}));
        assert!(feature_row(&names(), &record).is_err());
        let record = object(json!({"income": null, "expense": 2000}));
        assert!(feature_row(&names(), &record).is_err());
    }

    #[test]
    fn feature_row_unknown_key_error() {
        let record = object(json!({"income": 4000, "expense": 2000, "rent": 800}));
        let error = feature_row(&names(), &record).unwrap_err();
        assert_eq!(error.to_string(), "unknown feature `rent`");
    }

    #[tokio::test]
    async fn predict_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .body_json(&json!({"income": 4000, "expense": 2000}))
            .send()
            .await;
        response.assert_status_is_ok();
        let prediction = read_json(response).await?["prediction"]
            .as_f64()
            .ok_or_else(|| anyhow!("`prediction` is not a number"))?;
        assert!(prediction.is_finite());
        assert!((prediction - 2000.0).abs() < 1e-6);
        Ok(())
    }

    #[tokio::test]
    async fn predict_invalid_json_error() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .content_type("application/json")
            .body("{income: 4000")
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn predict_wrong_content_type_error() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .content_type("text/plain")
            .body(r#"{"income": 4000, "expense": 2000}"#)
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(read_json(response).await?["error"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn predict_missing_content_type_error() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .body(r#"{"income": 4000, "expense": 2000}"#)
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn predict_empty_body_error() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .content_type("application/json")
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn predict_not_an_object_error() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .body_json(&json!([4000, 2000]))
            .send()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn predict_missing_feature_error() -> Result {
        let client = create_test_client()?;
        let response = client
            .post("/predict")
            .body_json(&json!({"income": 4000}))
            .send()
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await?;
        assert!(body.get("prediction").is_none());
        assert_eq!(body["error"], "missing feature `expense`");
        Ok(())
    }

    #[tokio::test]
    async fn predict_wrong_method_error() -> Result {
        let client = create_test_client()?;
        client
            .get("/predict")
            .send()
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_error() -> Result {
        let client = create_test_client()?;
        client
            .post("/health")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }
}
