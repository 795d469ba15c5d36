#[cfg(test)]
mod http_api {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use tasador::{
        estimator::Estimator,
        models::feature_record::FeatureRecord,
        predictor::{ModelError, Predictor},
        web::{router, AppState},
    };
    use tokio::net::TcpListener;

    struct SurfacePricePredictor;

    impl Predictor for SurfacePricePredictor {
        fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
            Ok(record.sup_m2 * 2400.0)
        }

        fn name(&self) -> &str {
            "surface"
        }
    }

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, ModelError> {
            Err(ModelError::Evaluation("tree 3 out of bounds".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    async fn serve(estimator: Estimator) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(AppState { estimator });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn default_form() -> Value {
        json!({
            "lat": -34.6037,
            "lon": -58.3816,
            "comuna": "Comuna 1",
            "dormitorios": 2,
            "banos": 1,
            "ambientes": 3,
            "sup_m2": 50.0
        })
    }

    #[tokio::test]
    async fn lists_fifteen_districts() {
        let base = serve(Estimator::unavailable()).await;
        let body: Value = reqwest::get(format!("{base}/api/comunas"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let comunas = body["data"]["comunas"].as_array().unwrap();
        assert_eq!(comunas.len(), 15);
        assert_eq!(comunas[6]["label"], "Comuna 7");
        assert_eq!(comunas[6]["index"], 7);
    }

    #[tokio::test]
    async fn estimate_returns_result() {
        let base = serve(Estimator::new(Some(Arc::new(SurfacePricePredictor)))).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/estimate"))
            .json(&default_form())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );

        let body: Value = response.json().await.unwrap();
        let data = &body["data"];
        assert_eq!(data["state"]["status"], "result");
        assert_eq!(data["state"]["prediction"]["price"], 120000.0);
        assert_eq!(data["state"]["prediction"]["price_per_m2"], 2400.0);
        assert_eq!(data["formatted_price"], "$120,000");
        assert_eq!(data["formatted_price_per_m2"], "$2,400");
    }

    #[tokio::test]
    async fn estimate_without_model_is_unavailable() {
        let base = serve(Estimator::unavailable()).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{base}/api/estimate"))
            .json(&default_form())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["data"]["state"]["status"], "unavailable");
        assert_eq!(
            body["data"]["message"],
            "No se puede hacer la predicción sin el modelo cargado."
        );
    }

    #[tokio::test]
    async fn estimate_rejects_out_of_range_input() {
        let base = serve(Estimator::unavailable()).await;
        let mut form = default_form();
        form["ambientes"] = json!(21);

        let response = reqwest::Client::new()
            .post(format!("{base}/api/estimate"))
            .json(&form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("ambientes"));
    }

    #[tokio::test]
    async fn estimate_rejects_unknown_district() {
        let base = serve(Estimator::unavailable()).await;
        let mut form = default_form();
        form["comuna"] = json!("Comuna 16");

        let response = reqwest::Client::new()
            .post(format!("{base}/api/estimate"))
            .json(&form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn estimate_reports_prediction_failure() {
        let base = serve(Estimator::new(Some(Arc::new(FailingPredictor)))).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/estimate"))
            .json(&default_form())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        let data = &body["data"];
        assert_eq!(data["state"]["status"], "error");
        assert_eq!(
            data["message"],
            "Error al hacer la predicción: model evaluation failed: tree 3 out of bounds"
        );
        assert!(data.get("formatted_price").is_none());
    }

    #[tokio::test]
    async fn preflight_is_answered_with_cors_headers() {
        let base = serve(Estimator::unavailable()).await;
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/api/estimate"))
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            headers["access-control-allow-methods"],
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers["access-control-allow-headers"], "content-type");
    }
}
