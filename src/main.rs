//! もぐらたたきAPIサーバーのエントリポイント
//! 設定読み込み、サービス初期化、HTTPサーバー起動を行う。

use std::sync::Arc;
use tokio::net::TcpListener;

use Whackamole::{
    api::{routes::create_router, service::GameService},
    config::Config,
    picker::RandomPicker,
    render::{GameObserver, LogObserver, NullObserver},
    session::GameSessionManager,
};

/// メイン関数 - サーバーの初期化と起動を担当
#[tokio::main]
async fn main() {
    // 設定ファイルと環境変数から統合設定を読み込み
    let config = Config::load();
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    println!("設定読み込み完了:");
    println!("  サーバー: {}:{}", config.server.host, config.server.port);
    println!(
        "  デフォルト盤面: {}x{}",
        config.game.default_board_width, config.game.default_board_height
    );
    println!("  デフォルト難易度: {:?}", config.game.default_difficulty);
    println!("  最大セッション数: {}", config.session.max_sessions);

    let session_manager = Arc::new(GameSessionManager::with_timeout(
        config.session.max_sessions,
        config.session.session_timeout_minutes,
    ));

    // ログ有効時はゲームイベントも標準出力に流す
    let observer: Arc<dyn GameObserver> = if config.server.enable_logging {
        Arc::new(LogObserver)
    } else {
        Arc::new(NullObserver)
    };
    let service = Arc::new(GameService::new_with_picker(
        session_manager,
        config.game.clone(),
        Arc::new(RandomPicker::new()),
        observer,
    ));

    // 非アクティブセッションの定期クリーンアップタスク
    if config.session.enable_session_cleanup {
        let cleanup_service = Arc::clone(&service);
        let cleanup_interval = config.session.cleanup_interval_minutes;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(
                cleanup_interval * 60,
            ));
            loop {
                interval.tick().await;
                let removed = cleanup_service.cleanup_inactive_sessions();
                if removed > 0 {
                    println!("セッションクリーンアップ: {}件削除", removed);
                }
            }
        });
    }

    let app = create_router(service, &config.server);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .unwrap_or_else(|e| {
            eprintln!("アドレスバインド失敗 {}: {}", bind_address, e);
            std::process::exit(1);
        });

    println!("もぐらたたきAPIサーバー開始: {}", bind_address);
    println!("サーバー稼働中 (Ctrl+C で停止)");

    // Axumサーバーを開始し、リクエストの処理を開始
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
