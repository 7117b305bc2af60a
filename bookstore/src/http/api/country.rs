// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::extract::Extension;
use log::info;

use crate::http::context::HttpServiceContext;
use crate::http::errors::ApiError;
use crate::http::extractors::{JsonBody, PathId};
use crate::http::response::{Empty, Envelope};
use crate::types::{Country, CreateCountryRequest, UpdateCountryRequest};

pub async fn get_countries(
    Extension(context): Extension<HttpServiceContext>,
) -> Result<Envelope<Vec<Country>>, ApiError> {
    info!("Received request to list countries");

    let countries = context.countries.list().await?;

    info!("Responding with {} countries", countries.len());
    Ok(Envelope::ok(countries))
}

pub async fn get_country(
    Extension(context): Extension<HttpServiceContext>,
    PathId(id): PathId<u8>,
) -> Result<Envelope<Country>, ApiError> {
    info!("Received request for country {}", id);

    let country = context.countries.get_by_id(id).await?;

    info!("Responding with country {}", id);
    Ok(Envelope::ok(country))
}

pub async fn create_country(
    Extension(context): Extension<HttpServiceContext>,
    JsonBody(request): JsonBody<CreateCountryRequest>,
) -> Result<Envelope<Country>, ApiError> {
    info!("Received request to create country");

    let country = context.countries.create(request).await?;

    info!("Created country {}", country.id);
    Ok(Envelope::ok(country))
}

pub async fn update_country(
    Extension(context): Extension<HttpServiceContext>,
    PathId(id): PathId<u8>,
    JsonBody(request): JsonBody<UpdateCountryRequest>,
) -> Result<Envelope<Country>, ApiError> {
    info!("Received request to update country {}", id);

    let country = context
        .countries
        .update(UpdateCountryRequest { id, ..request })
        .await?;

    info!("Updated country {}", id);
    Ok(Envelope::ok(country))
}

/// Handle requests deleting a country, rejected while authors still live in it.
pub async fn delete_country(
    Extension(context): Extension<HttpServiceContext>,
    PathId(id): PathId<u8>,
) -> Result<Envelope<Empty>, ApiError> {
    info!("Received request to delete country {}", id);

    context.countries.delete(id).await?;

    info!("Deleted country {}", id);
    Ok(Envelope::ok(Empty {}))
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;
    use serde_json::{json, Value};

    use crate::test_utils::{add_author, author, http_test_client, test_runner, TestNode};
    use crate::types::Author;

    fn indonesia() -> Value {
        json!({
            "iso3": "IDN",
            "country": "Republic of Indonesia",
            "nice_country": "Indonesia",
            "currency": "IDR",
        })
    }

    #[rstest]
    fn country_lifecycle() {
        test_runner(|node: TestNode| async move {
            let client = http_test_client(&node);

            let response = client.get("/countries").send().await;
            assert_eq!(response.json::<Value>().await["data"], json!([]));

            let response = client.post("/countries").json(&indonesia()).send().await;
            assert_eq!(response.status(), StatusCode::OK);
            let created: Value = response.json().await;
            let path = format!("/countries/{}", created["data"]["id"]);
            assert_eq!(created["data"]["nice_country"], json!("Indonesia"));

            let response = client
                .put(&path)
                .json(&json!({ "currency": "Rupiah" }))
                .send()
                .await;
            assert_eq!(response.status(), StatusCode::OK);
            let updated: Value = response.json().await;
            assert_eq!(updated["data"]["currency"], json!("Rupiah"));
            assert_eq!(updated["data"]["iso3"], json!("IDN"));

            let response = client.get("/countries").send().await;
            let list: Value = response.json().await;
            assert_eq!(list["data"].as_array().unwrap().len(), 1);
            assert_eq!(list["data"][0]["currency"], json!("Rupiah"));

            let response = client.delete(&path).send().await;
            assert_eq!(response.status(), StatusCode::OK);

            let response = client.get(&path).send().await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        });
    }

    #[rstest]
    #[case(json!({ "iso3": "ID", "country": "Republic of Indonesia", "nice_country": "Indonesia", "currency": "IDR" }), "Invalid request: iso3")]
    #[case(json!({ "iso3": "IDN" }), "Invalid request: country, currency, nice_country")]
    fn rejects_invalid_country(#[case] body: Value, #[case] message: &'static str) {
        test_runner(move |node: TestNode| async move {
            let client = http_test_client(&node);

            let response = client.post("/countries").json(&body).send().await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<Value>().await["message"], json!(message));
        });
    }

    #[rstest]
    fn identifier_out_of_range_is_bad_request() {
        test_runner(|node: TestNode| async move {
            let client = http_test_client(&node);

            let response = client.get("/countries/256").send().await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        });
    }

    #[rstest]
    fn country_with_authors_can_not_be_deleted(author: Author) {
        test_runner(|node: TestNode| async move {
            let client = http_test_client(&node);

            let created: Value = client
                .post("/countries")
                .json(&indonesia())
                .send()
                .await
                .json()
                .await;
            let id = created["data"]["id"].as_u64().unwrap();
            add_author(
                &node.context.store,
                &Author {
                    country_id: id as u8,
                    ..author
                },
            )
            .await;

            let response = client.delete(&format!("/countries/{}", id)).send().await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.json::<Value>().await["message"],
                json!("Invalid request: country conflicts with existing records")
            );
        });
    }
}
