//! Streams tipados entre stages.
//!
//! Un `Stream<T>` tiene un único consumidor y puede estar respaldado por un
//! canal acotado o por una secuencia en memoria (semillas de `generator`).
//! El lado productor es `Emitter<T>`; el stream se cierra cuando se suelta
//! el último emitter, de modo que sólo el productor cierra y lo hace una vez.
//!
//! Toda espera (recibir o enviar) compite con el `CancellationToken` del
//! run, así que ningún stage queda bloqueado tras una cancelación.

use std::fmt;
use std::vec;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;

enum Source<T> {
    Channel(mpsc::Receiver<T>),
    Seeds(vec::IntoIter<T>),
    Closed,
}

/// Lado consumidor de una conexión entre stages.
pub struct Stream<T> {
    source: Source<T>,
}

impl<T> Stream<T> {
    /// Stream ya cerrado: la primera lectura devuelve `None`.
    #[inline]
    pub fn closed() -> Self {
        Self { source: Source::Closed }
    }

    fn from_receiver(rx: mpsc::Receiver<T>) -> Self {
        Self { source: Source::Channel(rx) }
    }

    fn from_seeds(seeds: Vec<T>) -> Self {
        if seeds.is_empty() {
            return Self::closed();
        }
        Self { source: Source::Seeds(seeds.into_iter()) }
    }

    /// Siguiente elemento, o `None` cuando el productor cerró.
    pub async fn next(&mut self) -> Option<T> {
        let item = match &mut self.source {
            Source::Channel(rx) => rx.recv().await,
            Source::Seeds(seeds) => seeds.next(),
            Source::Closed => None,
        };
        if item.is_none() {
            // Suelta el receiver para que los emitters vean el cierre.
            self.source = Source::Closed;
        }
        item
    }

    /// Como `next`, pero devuelve `None` en cuanto se cancela el token.
    pub async fn next_or_cancel(&mut self, token: &CancellationToken) -> Option<T> {
        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            item = self.next() => item,
        }
    }

    /// Drena el stream completo en orden de llegada.
    pub async fn collect(mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item);
        }
        items
    }

    /// `true` si ya se observó el cierre.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self.source, Source::Closed)
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.source {
            Source::Channel(_) => "channel",
            Source::Seeds(_) => "seeds",
            Source::Closed => "closed",
        };
        f.debug_struct("Stream").field("source", &kind).finish()
    }
}

/// Lado productor. Clonable para fan-in; el stream cierra al soltar el último.
pub struct Emitter<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> Emitter<T> {
    /// Envía `item` respetando backpressure. Devuelve `false` si el
    /// consumidor ya no lee o si el run fue cancelado; en ambos casos el
    /// productor debe dejar de emitir.
    pub async fn emit(&self, token: &CancellationToken, item: T) -> bool {
        tokio::select! {
            biased;
            _ = token.cancelled() => false,
            sent = self.tx.send(item) => sent.is_ok(),
        }
    }

    /// `true` si el consumidor soltó su `Stream`.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Se completa cuando el consumidor suelta su `Stream`.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").field("closed", &self.tx.is_closed()).finish()
    }
}

/// Canal con la capacidad configurada del motor.
pub fn channel<T>() -> (Emitter<T>, Stream<T>) {
    channel_with_capacity(EngineConfig::global().stream_capacity)
}

/// Canal con capacidad explícita (0 se trata como 1).
pub fn channel_with_capacity<T>(capacity: usize) -> (Emitter<T>, Stream<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (Emitter { tx }, Stream::from_receiver(rx))
}

/// Emite `seeds` en orden y luego cierra. Una lista vacía produce un stream
/// cerrado. No lanza tareas, por lo que no puede quedar colgado.
pub fn generator<T>(seeds: Vec<T>) -> Stream<T> {
    Stream::from_seeds(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emitter_sees_closed_consumer() {
        let (tx, rx) = channel_with_capacity::<u8>(1);
        drop(rx);
        let token = CancellationToken::new();
        assert!(tx.is_closed());
        assert!(!tx.emit(&token, 1).await);
    }

    #[tokio::test]
    async fn stream_closes_after_last_emitter() {
        let (tx, mut rx) = channel_with_capacity::<u8>(4);
        let token = CancellationToken::new();
        let tx2 = tx.clone();
        assert!(tx.emit(&token, 1).await);
        drop(tx);
        assert!(tx2.emit(&token, 2).await);
        drop(tx2);
        assert_eq!(rx.next().await, Some(1));
        assert_eq!(rx.next().await, Some(2));
        assert_eq!(rx.next().await, None);
        assert!(rx.is_closed());
    }

    #[tokio::test]
    async fn closed_resolves_when_consumer_leaves() {
        let (tx, rx) = channel_with_capacity::<u8>(1);
        let waiter = tokio::spawn(async move { tx.closed().await });
        drop(rx);
        tokio::time::timeout(std::time::Duration::from_secs(1), waiter).await
                                                                     .expect("closed() debe completarse")
                                                                     .unwrap();
    }

    #[tokio::test]
    async fn cancelled_token_ends_reads() {
        let (_tx, mut rx) = channel_with_capacity::<u8>(1);
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(rx.next_or_cancel(&token).await, None);
    }
}
