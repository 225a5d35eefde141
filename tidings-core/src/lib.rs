//! 进程内事件分发核心库（tidings-core）
//!
//! 提供强类型、分优先级、可取消的发布/订阅分发引擎：
//! - 事件类型（`event`）：以零大小标记类型命名事件，并在编译期绑定载荷类型；
//! - 优先级（`priority`）：`Before` → `Normal` → `After` 三档固定顺序；
//! - 流程控制（`flow`）：监听器显式返回继续 / 替换载荷 / 取消三种结果；
//! - 注册表（`registry`）：按事件类型与优先级分桶保存监听器，并提供订阅句柄；
//! - 分发器（`dispatch`）：同步与异步两种严格顺序的分发算法；
//! - 发射器（`emitter`）：对外的注册与发射入口。
//!
//! 典型用法：
//! 1. 为每类事件定义标记类型并实现 `Event`（或使用 `tidings-macros` 的 `#[event_map]`）；
//! 2. 通过 `Emitter::on_at` / `Emitter::on_async_at` 注册监听器，保留返回的 `Subscription`；
//! 3. 使用 `emit_sync` 或 `emit` 发射事件，根据 `Emitted` 判断是否被取消并取得最终载荷。
//!
//! ```rust
//! use tidings_core::{Emitted, Emitter, Event, Flow, Priority};
//!
//! struct Move;
//!
//! impl Event for Move {
//!     const NAME: &'static str = "move";
//!     type Payload = (i32, i32, i32);
//! }
//!
//! let emitter: Emitter = Emitter::new();
//! emitter.on::<Move, _>(|&(x, _, z)| Ok(Flow::Replace((x, 0, z))));
//! emitter.on_at::<Move, _>(Priority::After, |_| Ok(Flow::Continue));
//!
//! let out = emitter.emit_sync::<Move>((1, 2, 3)).unwrap();
//! assert_eq!(out, Emitted::Completed((1, 0, 3)));
//! ```
//!
pub mod config;
mod dispatch;
pub mod emitter;
pub mod error;
pub mod event;
pub mod flow;
pub mod listener;
pub mod priority;
pub mod registry;

pub use config::EmitterConfig;
pub use emitter::Emitter;
pub use error::{EmitError, EmitResult};
pub use event::{AnyEvent, Event, EventKey, EventMap, EventOf};
pub use flow::{Cancellation, Emitted, Flow, ListenerResult};
pub use futures_util::future::BoxFuture;
pub use listener::{AsyncListener, ListenerId};
pub use priority::Priority;
pub use registry::Subscription;

// 允许在本 crate 内部通过 ::tidings_core 进行自引用，
// 以便过程宏生成的代码在本 crate 的测试中也能解析到 ::tidings_core 路径。
extern crate self as tidings_core;
