// ============================================================
// Layer 5 — Compute Placement
// ============================================================
// Picks the Burn backend a task runs on.
//
//   Cpu → Autodiff<NdArray>   (always compiled)
//   Gpu → Autodiff<Wgpu>      (only with the `wgpu` cargo feature)
//
// Training needs the Autodiff wrapper; inference uses the inner
// backend (B::InnerBackend), which shares the same device type.
//
// Asking for the GPU on a build without the `wgpu` feature is not
// an error: the task is skipped and `launch` returns Ok(None).

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    tensor::backend::AutodiffBackend,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Cpu,
    Gpu,
}

impl Placement {
    pub fn from_flag(use_gpu: bool) -> Self {
        if use_gpu { Placement::Gpu } else { Placement::Cpu }
    }

    /// Whether this build can run on the placement at all.
    pub fn is_compiled(self) -> bool {
        match self {
            Placement::Cpu => true,
            Placement::Gpu => cfg!(feature = "wgpu"),
        }
    }
}

/// Work that is generic over the training backend.
pub trait BackendTask {
    type Output;

    fn run<B: AutodiffBackend>(self, device: B::Device) -> Result<Self::Output>;
}

/// Run `task` on the backend for `placement`.
///
/// Returns `Ok(None)` without touching the task when the placement
/// was not compiled in.
pub fn launch<T: BackendTask>(placement: Placement, task: T) -> Result<Option<T::Output>> {
    if !placement.is_compiled() {
        tracing::debug!("{:?} placement not compiled in, nothing to do", placement);
        return Ok(None);
    }
    match placement {
        Placement::Cpu => {
            tracing::info!("Using NdArray CPU backend");
            task.run::<Autodiff<NdArray>>(NdArrayDevice::default()).map(Some)
        }
        Placement::Gpu => launch_gpu(task),
    }
}

#[cfg(feature = "wgpu")]
fn launch_gpu<T: BackendTask>(task: T) -> Result<Option<T::Output>> {
    use burn::backend::{wgpu::WgpuDevice, Wgpu};

    let device = WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    task.run::<Autodiff<Wgpu>>(device).map(Some)
}

#[cfg(not(feature = "wgpu"))]
fn launch_gpu<T: BackendTask>(_task: T) -> Result<Option<T::Output>> {
    Ok(None)
}
