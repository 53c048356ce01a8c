use futures::future::LocalBoxFuture;

/// Lanza futuros en el hilo principal (spawn_local en WASM, LocalPool en tests)
pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[cfg(target_arch = "wasm32")]
pub struct WasmSpawner;

#[cfg(target_arch = "wasm32")]
impl TaskSpawner for WasmSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

impl TaskSpawner for futures::executor::LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        use futures::task::LocalSpawnExt;

        if let Err(e) = self.spawn_local(task) {
            log::error!("❌ [TASKS] No se pudo lanzar la tarea: {}", e);
        }
    }
}
