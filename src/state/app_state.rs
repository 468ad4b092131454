//! Host state shared between the countdown task and the HTTP handlers

use std::{
    sync::Arc,
    time::Instant,
};
use tokio::sync::watch;
use tracing::{info, warn};

use super::CountdownStatus;
use crate::{
    dom::{markup::render_banner, DomBinding, DomContract, MemoryDom},
    settings::{BannerConfig, PageConfig},
};

/// One rendered page with the widget mounted on it
#[derive(Debug)]
pub struct AppState {
    /// Configuration snapshot, fixed for the page's lifetime
    pub config: Arc<BannerConfig>,
    pub contract: DomContract,
    pub dom: Arc<MemoryDom>,
    /// `None` when the page carries no banner root
    pub binding: Option<DomBinding>,
    /// Countdown status published by the controller
    pub status_tx: Arc<watch::Sender<CountdownStatus>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Render the page's banner into a fresh document and bind the widget to it
    pub fn mount(page: &PageConfig, contract: DomContract, host: String, port: u16) -> Self {
        let dom = MemoryDom::new();
        render_banner(&dom, &contract, &page.banner);
        Self::with_document(Arc::new(page.data.clone()), dom, contract, host, port)
    }

    /// Bind the widget to an existing document
    pub fn with_document(
        config: Arc<BannerConfig>,
        dom: MemoryDom,
        contract: DomContract,
        host: String,
        port: u16,
    ) -> Self {
        let binding = DomBinding::resolve(&dom, &contract);
        match &binding {
            Some(_) => info!("Banner #{} mounted", contract.root_id),
            None => warn!("Banner #{} not found, widget is inert", contract.root_id),
        }

        let (status_tx, _) = watch::channel(CountdownStatus::default());
        Self {
            config,
            contract,
            dom: Arc::new(dom),
            binding,
            status_tx: Arc::new(status_tx),
            start_time: Instant::now(),
            port,
            host,
        }
    }

    pub fn status(&self) -> CountdownStatus {
        self.status_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownStatus> {
        self.status_tx.subscribe()
    }

    /// Serialized banner subtree, if the page has one
    pub fn banner_html(&self) -> Option<String> {
        self.binding
            .as_ref()
            .map(|binding| self.dom.outer_html(binding.root))
    }

    /// Calculate host uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
