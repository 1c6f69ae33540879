//! Greeting session tests over a real socket.

use super::*;
use crate::inbound::ws;
use crate::inbound::ws::state::WsState;
use actix_web::{App, HttpServer, dev::Server, dev::ServerHandle};
use awc::{BoxedSocket, ws::Codec, ws::Frame};
use chrono::{DateTime, Local, TimeZone, Utc};
use futures_util::{SinkExt, StreamExt};
use mockable::Clock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Socket = actix_codec::Framed<BoxedSocket, Codec>;

const GREETING_PERIOD: Duration = Duration::from_millis(20);

struct FixtureClock;

impl FixtureClock {
    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        Self::instant().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

#[fixture]
async fn start_ws_server() -> (String, Server) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let greetings = GreetingService::with_period(Arc::new(FixtureClock), GREETING_PERIOD)
        .expect("non-zero period");
    let ws_state = WsState::new(greetings);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(ws_state.clone()))
            .service(ws::greetings_entry)
    })
    .listen(listener)
    .expect("bind test server")
    .disable_signals()
    .run();
    let url = format!("http://{addr}");
    (url, server)
}

#[fixture]
async fn ws_client(#[future] start_ws_server: (String, Server)) -> (Socket, ServerHandle) {
    let (url, server) = start_ws_server.await;
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let (_resp, socket) = awc::Client::default()
        .ws(format!("{url}/ws/greetings"))
        .connect()
        .await
        .expect("websocket connect");

    (socket, handle)
}

/// Read the next text frame, answering pings so the session stays alive.
async fn next_text_frame(socket: &mut Socket) -> String {
    loop {
        let frame = socket.next().await.expect("response frame").expect("frame");
        match frame {
            Frame::Text(bytes) => {
                return String::from_utf8(bytes.to_vec()).expect("utf-8 greeting");
            }
            Frame::Ping(payload) => socket
                .send(awc::ws::Message::Pong(payload))
                .await
                .expect("send pong"),
            Frame::Pong(_) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

#[rstest]
#[actix_rt::test]
async fn streams_greetings_for_a_name(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    socket
        .send(awc::ws::Message::Text("Josh".into()))
        .await
        .expect("send text");

    for _ in 0..3 {
        let text = next_text_frame(&mut socket).await;
        assert_eq!(text, "Hello Josh @ 2026-10-19T12:00:00Z !");
    }
}

#[rstest]
#[actix_rt::test]
async fn greets_the_name_exactly_as_sent(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    socket
        .send(awc::ws::Message::Text(" Ria".into()))
        .await
        .expect("send text");

    let text = next_text_frame(&mut socket).await;
    assert_eq!(text, "Hello  Ria @ 2026-10-19T12:00:00Z !");
}

#[rstest]
#[actix_rt::test]
async fn interleaves_streams_for_several_names(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    for name in ["Olga", "Ria"] {
        socket
            .send(awc::ws::Message::Text(name.into()))
            .await
            .expect("send text");
    }

    let mut seen_olga = false;
    let mut seen_ria = false;
    for _ in 0..10 {
        let text = next_text_frame(&mut socket).await;
        seen_olga |= text.starts_with("Hello Olga @ ");
        seen_ria |= text.starts_with("Hello Ria @ ");
        if seen_olga && seen_ria {
            break;
        }
    }
    assert!(seen_olga && seen_ria, "both names are greeted");
}

#[rstest]
#[actix_rt::test]
async fn closes_on_empty_name(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    socket
        .send(awc::ws::Message::Text("   ".into()))
        .await
        .expect("send text");

    let reason = loop {
        let frame = socket.next().await.expect("response frame").expect("frame");
        match frame {
            Frame::Ping(_) | Frame::Pong(_) => continue,
            Frame::Close(reason) => break reason.expect("reason"),
            other => panic!("expected close frame, got {other:?}"),
        }
    };
    assert_eq!(reason.code, CloseCode::Policy);
}

#[rstest]
#[actix_rt::test]
async fn closes_after_timeout_without_client_messages(
    #[future] ws_client: (Socket, ServerHandle),
) {
    let (mut socket, _server) = ws_client.await;
    tokio::time::sleep(CLIENT_TIMEOUT + HEARTBEAT_INTERVAL * 3).await;

    let observed_close = tokio::time::timeout(Duration::from_secs(2), async {
        let mut observed = None;
        while let Some(frame) = socket.next().await {
            let frame = frame.expect("frame");
            match frame {
                Frame::Ping(_) | Frame::Pong(_) => continue,
                Frame::Close(reason) => {
                    observed = reason;
                    break;
                }
                other => panic!("unexpected frame before close: {other:?}"),
            }
        }
        observed
    })
    .await
    .expect("close frame missing within timeout")
    .expect("close frame missing after timeout");

    assert_eq!(observed_close.code, CloseCode::Normal);
    assert_eq!(
        observed_close.description.as_deref(),
        Some("heartbeat timeout")
    );
}

#[rstest]
#[actix_rt::test]
async fn plain_http_request_is_rejected(#[future] start_ws_server: (String, Server)) {
    let (url, server) = start_ws_server.await;
    let _handle = server.handle();
    actix_web::rt::spawn(server);

    let response = awc::Client::default()
        .get(format!("{url}/ws/greetings"))
        .send()
        .await
        .expect("http response");

    assert!(response.status().is_client_error());
}
