/// 优先级链示例
/// 展示 Before 校验 -> Normal 规整 -> After 审计 的处理链，以及取消与退订
use anyhow::Result as AnyResult;
use std::sync::{Arc, Mutex};
use tidings_core::{Emitted, Emitter, EmitterConfig, Flow, Priority};
use tidings_macros::event_map;
use tracing_subscriber::EnvFilter;

// ============================================================================
// 事件定义
// ============================================================================

#[derive(Clone, Debug)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

#[event_map]
#[derive(Debug)]
pub enum DocEvent {
    #[event(name = "doc.saved")]
    Saved(Draft),
    #[event(name = "doc.closed")]
    Closed,
}

// ============================================================================
// 审计日志（After 档异步监听器）
// ============================================================================

#[derive(Clone, Default)]
struct AuditLog {
    inner: Arc<Mutex<Vec<String>>>,
}

impl AuditLog {
    fn push(&self, line: String) {
        self.inner.lock().unwrap().push(line);
    }

    fn lines(&self) -> Vec<String> {
        self.inner.lock().unwrap().clone()
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tidings_core=debug".parse()?))
        .init();

    let emitter: Emitter<DocEvent> =
        Emitter::with_config(EmitterConfig::builder().name("editor").build());
    let audit = AuditLog::default();

    // 校验：空标题直接取消
    emitter.on_at::<Saved, _>(Priority::Before, |draft| {
        if draft.title.trim().is_empty() {
            return Ok(Flow::cancel("title must not be empty"));
        }
        Ok(Flow::Continue)
    });

    // 规整：去除首尾空白
    let trim = emitter.on::<Saved, _>(|draft| {
        Ok(Flow::Replace(Draft {
            title: draft.title.trim().to_string(),
            body: draft.body.trim().to_string(),
        }))
    });

    // 审计：记录最终载荷
    let log = audit.clone();
    emitter.on_async_at::<Saved, _, _>(Priority::After, move |draft| {
        let log = log.clone();
        async move {
            tokio::task::yield_now().await;
            log.push(format!("saved '{}' ({} bytes)", draft.title, draft.body.len()));
            Ok(Flow::Continue)
        }
    });

    let log = audit.clone();
    emitter.on::<Closed, _>(move |()| {
        log.push("closed".to_string());
        Ok(Flow::Continue)
    });

    let out = emitter
        .dispatch(DocEvent::Saved(Draft {
            title: "  Release notes ".into(),
            body: " v0.1 \n".into(),
        }))
        .await?;
    println!("first save  -> {out:?}");

    let out = emitter
        .dispatch(DocEvent::Saved(Draft {
            title: "   ".into(),
            body: "ignored".into(),
        }))
        .await?;
    if let Emitted::Cancelled(reason) = &out {
        println!("second save -> {reason}");
    }

    // 退订规整后，载荷原样到达审计
    trim.off();
    emitter
        .dispatch(DocEvent::Saved(Draft {
            title: "raw ".into(),
            body: "x".into(),
        }))
        .await?;

    // 只有同步监听器的事件可以同步发射
    emitter.dispatch_sync(DocEvent::Closed)?;

    println!("events      -> {:?}", emitter.event_names());
    for line in audit.lines() {
        println!("audit       -> {line}");
    }
    Ok(())
}
