// [libs/core/repository/src/transaction_handle.rs]
/*!
 * =================================================================
 * APARATO: TRANSACTION HANDLE OPACO
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: ENVOLTURA TYPE-ERASED SOBRE LA TRANSACCIÓN CONCRETA DEL BACKEND
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: renombrado desde el abreviado `Tx` original; ningún
 *    llamador del núcleo conoce el tipo interno.
 * 2. HYGIENE TOTAL: `downcast_mut`/`into_inner` son los únicos puntos
 *    donde el backend recupera su tipo concreto.
 * =================================================================
 */

use std::any::Any;

/// An open, backend-specific transaction. The orchestration core composes
/// several repository calls against one `TransactionHandle` per incoming
/// request (spec §4.3); the concrete backend (`fednode-infra-db`) is the
/// only crate that knows what's inside.
pub struct TransactionHandle(Box<dyn Any + Send>);

impl TransactionHandle {
    pub fn new<T: Any + Send>(inner: T) -> Self {
        Self(Box::new(inner))
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.downcast_mut::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Consumes the box and returns the concrete backend transaction,
    /// e.g. to call its owned `commit`/`rollback`.
    pub fn into_inner<T: Any>(self) -> Option<T> {
        self.0.downcast::<T>().ok().map(|boxed| *boxed)
    }
}
