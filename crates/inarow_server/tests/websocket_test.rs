//! End-to-end session over a real socket.

use futures::{SinkExt, StreamExt};
use inarow_board::{ClientMessage, Coord, Line, PlayerColor, RoomOptions, ServerMessage};
use inarow_server::{DirectoryClient, ServerConfig, ServerState, serve_on};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Bind");
    let addr = listener.local_addr().expect("Local addr");
    let state = ServerState::new(ServerConfig::default());
    tokio::spawn(serve_on(listener, state));
    addr
}

async fn connect(addr: SocketAddr, uid: &str) -> WsStream {
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws")).await.expect("Connect");
    send(&mut ws, ClientMessage::Uid(uid.into())).await;
    ws
}

async fn send(ws: &mut WsStream, message: ClientMessage) {
    let text = message.encode().expect("Encodable");
    ws.send(Message::Text(text.into())).await.expect("Send");
}

async fn recv(ws: &mut WsStream) -> ServerMessage {
    loop {
        let frame = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("Message before timeout")
            .expect("Stream open")
            .expect("Valid frame");
        if let Message::Text(text) = frame {
            return ServerMessage::decode(text.as_str()).expect("Valid server message");
        }
    }
}

async fn recv_until(ws: &mut WsStream, done: impl Fn(&ServerMessage) -> bool) -> ServerMessage {
    loop {
        let message = recv(ws).await;
        if done(&message) {
            return message;
        }
    }
}

#[tokio::test]
async fn test_two_players_play_to_a_win() {
    let addr = start_server().await;
    let mut ann = connect(addr, "u-ann").await;
    let mut bob = connect(addr, "u-bob").await;

    send(&mut ann, ClientMessage::Ping(7)).await;
    assert_eq!(recv(&mut ann).await, ServerMessage::Pong(7));

    send(
        &mut ann,
        ClientMessage::Create("u-ann".into(), "ann".into(), "ttt".into(), RoomOptions::tic_tac_toe()),
    )
    .await;
    assert_eq!(
        recv(&mut ann).await,
        ServerMessage::JoinAccept(RoomOptions::tic_tac_toe())
    );
    assert_eq!(recv(&mut ann).await, ServerMessage::Players(vec!["ann".into()]));

    let directory = DirectoryClient::new(format!("http://{addr}"))
        .rooms()
        .await
        .expect("Directory");
    assert_eq!(directory.len(), 1);
    assert_eq!(directory[0].name(), "ttt");
    assert_eq!(directory[0].players(), 1);
    assert_eq!(directory[0].max_players(), 2);

    send(&mut bob, ClientMessage::Join("u-bob".into(), "bob".into(), "ttt".into())).await;
    assert_eq!(
        recv_until(&mut bob, |m| matches!(m, ServerMessage::GameStarted(_))).await,
        ServerMessage::GameStarted(1)
    );
    assert_eq!(
        recv_until(&mut ann, |m| matches!(m, ServerMessage::GameStarted(_))).await,
        ServerMessage::GameStarted(0)
    );

    let moves = [(0, 0), (0, 1), (1, 0), (1, 1)];
    for (i, (x, y)) in moves.into_iter().enumerate() {
        let mover = if i % 2 == 0 { &mut ann } else { &mut bob };
        send(mover, ClientMessage::Action(x, y)).await;
        let taken = recv(&mut ann).await;
        assert!(matches!(taken, ServerMessage::ActionTaken(ax, ay, _, _) if ax == x && ay == y));
        recv(&mut bob).await;
    }

    send(&mut ann, ClientMessage::Action(2, 0)).await;
    assert_eq!(
        recv(&mut bob).await,
        ServerMessage::ActionTaken(2, 0, PlayerColor::Red, 1)
    );
    assert_eq!(
        recv(&mut bob).await,
        ServerMessage::GameWon(
            PlayerColor::Red,
            vec![Line::new(Coord::new(0, 0), Coord::new(2, 0))]
        )
    );

    let directory = DirectoryClient::new(format!("http://{addr}"))
        .rooms()
        .await
        .expect("Directory");
    assert!(directory.is_empty());
}

#[tokio::test]
async fn test_rejection_goes_to_requester() {
    let addr = start_server().await;
    let mut ann = connect(addr, "u-ann").await;
    send(&mut ann, ClientMessage::Join("u-ann".into(), "ann".into(), "ghost".into())).await;
    assert_eq!(
        recv(&mut ann).await,
        ServerMessage::JoinReject("Game not found.".into())
    );
}
