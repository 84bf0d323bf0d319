use crate::{handler::product::broadcast_products, state::AppState};
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt, stream::SplitSink};
use product::domain::requests::product::CreateProductRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use validator::Validate;

const PRODUCTS_UPDATED: &str = "productosActualizados";
const REQUEST_PRODUCTS: &str = "solicitarProductos";
const ADD_PRODUCT: &str = "agregarProducto";
const ADD_PRODUCT_ERROR: &str = "errorAgregarProducto";
const DELETE_PRODUCT: &str = "eliminarProducto";
const DELETE_PRODUCT_ERROR: &str = "errorEliminarProducto";

#[derive(Debug, Deserialize)]
struct ClientFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Serialize)]
struct ServerFrame<'a, T: Serialize> {
    event: &'a str,
    data: T,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("🔌 Websocket client connected");

    let (mut sink, mut stream) = socket.split();
    let mut events = state.product_events.subscribe();

    loop {
        tokio::select! {
            update = events.recv() => match update {
                Ok(products) => {
                    if send_frame(&mut sink, PRODUCTS_UPDATED, &products).await.is_err() {
                        break;
                    }
                }
                // A lagging socket only misses intermediate snapshots.
                Err(RecvError::Lagged(skipped)) => {
                    warn!("⚠️ Websocket client lagged, skipped {skipped} updates");
                }
                Err(RecvError::Closed) => break,
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if handle_client_frame(text.as_str(), &mut sink, &state).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("⚠️ Websocket receive error: {e:?}");
                    break;
                }
            },
        }
    }

    info!("🔌 Websocket client disconnected");
}

async fn handle_client_frame(
    raw: &str,
    sink: &mut SplitSink<WebSocket, Message>,
    state: &Arc<AppState>,
) -> Result<(), axum::Error> {
    let frame: ClientFrame = match serde_json::from_str(raw) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("⚠️ Ignoring malformed websocket frame: {e}");
            return Ok(());
        }
    };

    match frame.event.as_str() {
        REQUEST_PRODUCTS => match state.di_container.product_query.list_all().await {
            Ok(products) => send_frame(sink, PRODUCTS_UPDATED, &products).await,
            Err(e) => {
                warn!("⚠️ Failed to fetch product list for socket: {e:?}");
                Ok(())
            }
        },

        ADD_PRODUCT => match parse_new_product(&frame.data) {
            Ok(req) => match state.di_container.product_command.create(&req).await {
                Ok(_) => {
                    broadcast_products(state).await;
                    Ok(())
                }
                Err(e) => send_frame(sink, ADD_PRODUCT_ERROR, &e.to_string()).await,
            },
            Err(message) => send_frame(sink, ADD_PRODUCT_ERROR, &message).await,
        },

        DELETE_PRODUCT => match parse_product_id(&frame.data) {
            Some(id) => match state.di_container.product_command.delete(id).await {
                Ok(_) => {
                    broadcast_products(state).await;
                    Ok(())
                }
                Err(e) => send_frame(sink, DELETE_PRODUCT_ERROR, &e.to_string()).await,
            },
            None => {
                send_frame(sink, DELETE_PRODUCT_ERROR, &"Invalid product id".to_string()).await
            }
        },

        other => {
            warn!("⚠️ Unknown websocket event: {other}");
            Ok(())
        }
    }
}

async fn send_frame<T: Serialize>(
    sink: &mut SplitSink<WebSocket, Message>,
    event: &str,
    data: &T,
) -> Result<(), axum::Error> {
    let frame = ServerFrame { event, data };
    let text = serde_json::to_string(&frame).map_err(axum::Error::new)?;
    sink.send(Message::Text(text.into())).await
}

/// Socket clients send every product field as a string; price and stock are
/// coerced to numbers here.
fn parse_new_product(data: &Value) -> Result<CreateProductRequest, String> {
    let field = |name: &str| -> Result<String, String> {
        data.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| format!("Missing field '{name}'"))
    };

    let price = match data.get("price") {
        Some(Value::String(s)) => s
            .parse::<f64>()
            .map_err(|_| format!("Invalid price '{s}'"))?,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| "Invalid price".to_string())?,
        _ => return Err("Missing field 'price'".to_string()),
    };

    let stock = match data.get("stock") {
        Some(Value::String(s)) => s
            .parse::<i32>()
            .map_err(|_| format!("Invalid stock '{s}'"))?,
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| "Invalid stock".to_string())?,
        _ => return Err("Missing field 'stock'".to_string()),
    };

    let req = CreateProductRequest {
        title: field("title")?,
        description: field("description")?,
        price,
        code: field("code")?,
        stock,
        category: field("category")?,
    };

    req.validate().map_err(|e| e.to_string())?;

    Ok(req)
}

fn parse_product_id(data: &Value) -> Option<i32> {
    let id = match data {
        Value::Number(n) => i32::try_from(n.as_i64()?).ok()?,
        Value::String(s) => s.parse::<i32>().ok()?,
        _ => return None,
    };

    (id >= 1).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_fields_are_coerced_to_numbers() {
        let data = json!({
            "title": "Hammer",
            "description": "Steel hammer",
            "price": "19.90",
            "code": "HAM1",
            "stock": "3",
            "category": "tools",
        });

        let req = parse_new_product(&data).unwrap();
        assert_eq!(req.price, 19.90);
        assert_eq!(req.stock, 3);
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let data = json!({
            "title": "Hammer",
            "description": "Steel hammer",
            "price": "cheap",
            "code": "HAM1",
            "stock": "3",
            "category": "tools",
        });

        assert!(parse_new_product(&data).unwrap_err().contains("price"));
    }

    #[test]
    fn missing_field_names_the_field() {
        let data = json!({ "title": "Hammer" });
        assert!(parse_new_product(&data).unwrap_err().contains("price"));
    }

    #[test]
    fn product_id_accepts_numbers_and_strings() {
        assert_eq!(parse_product_id(&json!(7)), Some(7));
        assert_eq!(parse_product_id(&json!("7")), Some(7));
        assert_eq!(parse_product_id(&json!(0)), None);
        assert_eq!(parse_product_id(&json!("abc")), None);
        assert_eq!(parse_product_id(&json!(null)), None);
    }

    #[test]
    fn server_frames_use_the_event_data_shape() {
        let frame = ServerFrame {
            event: PRODUCTS_UPDATED,
            data: vec!["x"],
        };
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(
            json,
            json!({ "event": "productosActualizados", "data": ["x"] })
        );
    }
}
