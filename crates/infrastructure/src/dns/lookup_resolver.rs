use super::reactor::TokioReactor;
use super::transport::UdpDatagramSocket;
use async_trait::async_trait;
use dnslookup_application::ports::{HostResolver, LookupOptions, NameserverProvider};
use dnslookup_application::use_cases::{Completion, LookupOutcome, LookupRequest, LookupStateMachine};
use dnslookup_domain::config::resolver::DEFAULT_DNS_PORT;
use dnslookup_domain::{DomainError, ErrorCode, ResolvedAnswers};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Single-datagram UDP lookups against the first configured nameserver.
///
/// Each lookup gets its own socket and its own reactor; nothing is shared
/// between concurrent lookups except the nameserver list.
#[derive(Clone)]
pub struct UdpLookupResolver {
    nameservers: Arc<dyn NameserverProvider>,
    port: u16,
    default_timeout: Option<Duration>,
}

impl UdpLookupResolver {
    pub fn new(nameservers: Arc<dyn NameserverProvider>) -> Self {
        Self {
            nameservers,
            port: DEFAULT_DNS_PORT,
            default_timeout: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Timeout applied when a lookup's options carry none.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Spawn a lookup and hand its outcome to exactly one of the
    /// continuations.
    pub fn lookup_with<S, F>(
        &self,
        name: impl Into<String>,
        options: LookupOptions,
        on_success: S,
        on_failure: F,
    ) -> JoinHandle<()>
    where
        S: FnOnce(ResolvedAnswers) + Send + 'static,
        F: FnOnce(ErrorCode) + Send + 'static,
    {
        let resolver = self.clone();
        let name = name.into();

        tokio::spawn(async move {
            match resolver.lookup(&name, options).await {
                Ok(answers) => on_success(answers),
                Err(e) => on_failure(e.code()),
            }
        })
    }

    fn request(&self, name: &str, options: LookupOptions) -> LookupRequest {
        let mut request = LookupRequest::from_options(name, options).with_port(self.port);
        if request.timeout.is_none() {
            request.timeout = self.default_timeout;
        }
        request
    }

    async fn run(&self, request: LookupRequest) -> LookupOutcome {
        let (completion, receiver) = Completion::channel();
        let mut machine = LookupStateMachine::new(request, completion);
        let mut reactor = TokioReactor::new();
        let token = reactor.allocate_token();

        machine.start(
            self.nameservers.as_ref(),
            |server| UdpDatagramSocket::open(server, token),
            &mut reactor,
        );
        if let Some(socket) = machine.socket() {
            reactor.attach(token, socket.handle());
        }

        while !machine.is_terminal() {
            match reactor.next_event().await {
                Some(event) => machine.handle_event(event, &mut reactor),
                None => break,
            }
        }
        debug!(state = ?machine.state(), "Lookup driver finished");
        drop(machine);

        receiver.await.unwrap_or_else(|_| {
            error!("Lookup ended without delivering an outcome");
            Err(DomainError::Io("lookup ended without an outcome".to_string()))
        })
    }
}

#[async_trait]
impl HostResolver for UdpLookupResolver {
    async fn lookup(
        &self,
        name: &str,
        options: LookupOptions,
    ) -> Result<ResolvedAnswers, DomainError> {
        let request = self.request(name, options);
        self.run(request).await
    }
}
