//! API reference served at `/docs`.

use axum::{Json, response::Html};
use serde_json::{Value, json};

const REDOC_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Eloquia API</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
  </head>
  <body>
    <redoc spec-url="/docs/doc.json"></redoc>
    <script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
  </body>
</html>
"#;

// ── GET /docs ────────────────────────────────────────────────────────────────

pub async fn docs_page() -> Html<&'static str> {
    Html(REDOC_PAGE)
}

// ── GET /docs/doc.json ───────────────────────────────────────────────────────

pub async fn openapi_document() -> Json<Value> {
    Json(openapi())
}

fn operation(tag: &str, summary: &str, auth: bool, body: Option<&str>) -> Value {
    let mut op = json!({
        "tags": [tag],
        "summary": summary,
        "responses": {
            "default": {
                "description": "Error",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}}
            }
        }
    });
    if auth {
        op["security"] = json!([{"sessionCookie": []}]);
    }
    if let Some(schema) = body {
        op["requestBody"] = json!({
            "required": true,
            "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
        });
    }
    op
}

fn id_parameter() -> Value {
    json!([{"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}])
}

fn openapi() -> Value {
    let mut approve = operation("links", "Approve a link", true, None);
    approve["parameters"] = id_parameter();
    let mut entries = operation("entries", "List a linked patient's entries", true, None);
    entries["parameters"] = id_parameter();
    let mut analytics = operation("analytics", "Aggregate a linked patient's entries", true, None);
    analytics["parameters"] = id_parameter();

    json!({
        "openapi": "3.0.3",
        "info": {"title": "Eloquia API", "version": env!("CARGO_PKG_VERSION")},
        "paths": {
            "/doctor/register": {"post": operation("doctor", "Register a doctor", false, Some("Register"))},
            "/doctor/login": {"post": operation("doctor", "Log in as a doctor", false, Some("Login"))},
            "/doctor/me": {"get": operation("doctor", "Current doctor", true, None)},
            "/doctor/logout": {"post": operation("doctor", "End the doctor session", true, None)},
            "/patient/register": {"post": operation("patient", "Register a patient", false, Some("Register"))},
            "/patient/login": {"post": operation("patient", "Log in as a patient", false, Some("Login"))},
            "/patient/me": {"get": operation("patient", "Current patient", true, None)},
            "/patient/mydoctor": {"get": operation("patient", "The patient's approved doctor", true, None)},
            "/patient/logout": {"post": operation("patient", "End the patient session", true, None)},
            "/patient/entries/sync": {
                "get": operation("entries", "Download entries", true, None),
                "post": operation("entries", "Upload and download entries", true, Some("Sync"))
            },
            "/practice": {"post": operation("practice", "Create a practice", true, Some("Practice"))},
            "/links/invite": {"post": operation("links", "Invite a patient", true, Some("Invite"))},
            "/links/request": {"post": operation("links", "Request a link to a patient", true, Some("Invite"))},
            "/links/{id}/approve": {"post": approve},
            "/links/pairing-code": {"post": operation("links", "Issue a pairing code", true, None)},
            "/links/pairing-code/redeem": {"post": operation("links", "Redeem a pairing code", true, Some("Redeem"))},
            "/links/revoke": {"post": operation("links", "Revoke every approved link", true, None)},
            "/patients": {"get": operation("links", "Linked patients and pending links", true, None)},
            "/patients/{id}/entries": {"get": entries},
            "/patients/{id}/analytics": {"get": analytics},
            "/entries/recent": {"get": operation("entries", "Recent entries across linked patients", true, None)},
            "/health": {"get": operation("system", "Liveness", false, None)},
            "/ready": {"get": operation("system", "Readiness", false, None)}
        },
        "components": {
            "securitySchemes": {
                "sessionCookie": {"type": "apiKey", "in": "cookie", "name": "eloquia_session"}
            },
            "schemas": {
                "Error": {
                    "type": "object",
                    "properties": {"kind": {"type": "string"}, "message": {"type": "string"}}
                },
                "Register": {
                    "type": "object",
                    "required": ["email", "displayName", "password"],
                    "properties": {
                        "email": {"type": "string"},
                        "displayName": {"type": "string"},
                        "password": {"type": "string", "minLength": 8}
                    }
                },
                "Login": {
                    "type": "object",
                    "required": ["email", "password"],
                    "properties": {"email": {"type": "string"}, "password": {"type": "string"}}
                },
                "Practice": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string"},
                        "address": {"type": "string"},
                        "logoUrl": {"type": "string"}
                    }
                },
                "Invite": {
                    "type": "object",
                    "properties": {
                        "patientId": {"type": "string", "format": "uuid"},
                        "patientEmail": {"type": "string"},
                        "patientCode": {"type": "string"},
                        "displayName": {"type": "string"}
                    }
                },
                "Redeem": {
                    "type": "object",
                    "required": ["code"],
                    "properties": {"code": {"type": "string", "pattern": "^\\d{6}$"}}
                },
                "Sync": {
                    "type": "object",
                    "properties": {
                        "updatedSince": {"type": "string", "format": "date-time"},
                        "from": {"type": "string", "format": "date-time"},
                        "to": {"type": "string", "format": "date-time"},
                        "entries": {"type": "array", "items": {"type": "object"}}
                    }
                }
            }
        }
    })
}
