use anyhow::Result;
use bybit_inverse::{
    Client, Coin, Error, Side, Symbol,
    api::{CancelOrderParam, CreateOrderParam, ListOrderParam},
    types::{OrderType, TimeInForce},
};
use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;
use std::collections::BTreeMap;
use wiremock::{
    Match, Mock, MockServer, Request, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn envelope(result: Value) -> Value {
    json!({
        "ret_code": 0,
        "ret_msg": "OK",
        "ext_code": "",
        "ext_info": "",
        "result": result,
        "time_now": "1577480599.097287"
    })
}

fn authed_client(server: &MockServer) -> Result<Client> {
    Ok(Client::builder(server.uri())?
        .auth("test-key", "test-secret")
        .build()?)
}

/// Matches requests whose query carries the signing triplet.
#[derive(Clone, Copy)]
struct SignedQuery;

impl Match for SignedQuery {
    fn matches(&self, request: &Request) -> bool {
        let pairs: BTreeMap<String, String> = request.url.query_pairs().into_owned().collect();
        pairs.contains_key("api_key")
            && pairs.contains_key("timestamp")
            && pairs.get("sign").is_some_and(|s| s.len() == 64)
    }
}

#[tokio::test]
async fn public_get_decodes_order_book() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/public/orderBook/L2"))
        .and(query_param("symbol", "BTCUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"symbol": "BTCUSD", "price": "9487", "size": 336241, "side": "Buy"},
            {"symbol": "BTCUSD", "price": "9487.5", "size": 522147, "side": "Sell"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri())?;
    let book = client.market().order_book(Symbol::BTCUSD).await?;

    assert_eq!(book.ret_code, 0);
    assert_eq!(book.result.len(), 2);
    assert_eq!(book.result[0].price, "9487");
    assert_eq!(book.result[1].side, Side::Sell);

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn private_get_carries_signature_in_query() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/private/order/list"))
        .and(query_param("symbol", "BTCUSD"))
        .and(SignedQuery)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({"data": [], "cursor": ""}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server)?;
    let orders = client
        .order()
        .list(ListOrderParam {
            symbol: Symbol::BTCUSD,
            order_status: None,
            direction: None,
            size: None,
            cursor: None,
        })
        .await?;
    assert!(orders.result.orders.is_empty());

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn create_order_posts_signed_json_without_absent_optionals() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/private/order/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "user_id": 1,
            "order_id": "335fd977-e5a5-4781-b6d0-c772d5bfb95b",
            "symbol": "BTCUSD",
            "side": "Buy",
            "order_type": "Market",
            "price": 0,
            "qty": 100,
            "time_in_force": "GoodTillCancel",
            "order_status": "Created",
            "last_exec_time": 0,
            "last_exec_price": 0,
            "leaves_qty": 100,
            "cum_exec_qty": 0,
            "cum_exec_value": 0,
            "cum_exec_fee": 0,
            "reject_reason": "",
            "order_link_id": "",
            "created_at": "2019-11-30T11:03:43.452Z",
            "updated_at": "2019-11-30T11:03:43.455Z"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server)?;
    let created = client
        .order()
        .create(CreateOrderParam {
            side: Side::Buy,
            symbol: Symbol::BTCUSD,
            order_type: OrderType::Market,
            qty: 100,
            time_in_force: TimeInForce::GoodTillCancel,
            price: None,
            take_profit: None,
            stop_loss: None,
            reduce_only: None,
            close_on_trigger: None,
            order_link_id: None,
        })
        .await?;
    assert_eq!(created.result.order_id, "335fd977-e5a5-4781-b6d0-c772d5bfb95b");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body)?;
    let fields = body.as_object().unwrap();

    // absent optionals never reach the wire
    assert!(!fields.contains_key("price"));
    assert!(!fields.contains_key("order_link_id"));
    assert_eq!(fields["side"], "Buy");
    assert_eq!(fields["qty"], 100);

    // signature covers every other field, sorted by key
    let mut payload = String::new();
    for (key, value) in fields {
        if key == "sign" {
            continue;
        }
        if !payload.is_empty() {
            payload.push('&');
        }
        payload.push_str(key);
        payload.push('=');
        match value {
            Value::String(s) => payload.push_str(s),
            other => payload.push_str(&other.to_string()),
        }
    }
    let mut mac = Hmac::<Sha256>::new_from_slice(b"test-secret")?;
    mac.update(payload.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());
    assert_eq!(fields["sign"], expected.as_str());

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn cancel_order_without_ids_never_reaches_transport() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/private/order/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(0)
        .mount(&server)
        .await;

    let client = authed_client(&server)?;
    let err = client
        .order()
        .cancel(CancelOrderParam {
            symbol: Symbol::BTCUSD,
            order_id: None,
            order_link_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn exchange_error_code_surfaces_message() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/private/wallet/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ret_code": 10003,
            "ret_msg": "invalid api_key",
            "ext_code": "",
            "ext_info": "",
            "result": null,
            "time_now": "1577480599.097287"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server)?;
    let err = client.wallet().balance(Coin::BTC).await.unwrap_err();

    match err {
        Error::Exchange {
            ret_code, ret_msg, ..
        } => {
            assert_eq!(ret_code, 10003);
            assert_eq!(ret_msg, "invalid api_key");
        }
        other => panic!("expected exchange error, got {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn http_error_propagates_status() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/public/symbols"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri())?;
    let err = client.market().symbols().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn private_endpoint_without_credentials_is_rejected_locally() -> Result<()> {
    let server = MockServer::start().await;

    let client = Client::new(server.uri())?;
    let err = client.position().list(Symbol::BTCUSD).await.unwrap_err();

    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
    Ok(())
}
