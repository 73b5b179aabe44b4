/// Typed getter over a `ResourceClient`, mapping framework errors into the
/// domain error.
macro_rules! impl_client_get {
    ($client_name:ident, $entity:ty, $error:ident, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(|e| $error::ActorCommunicationError(e.to_string()))
                }
            }
        }
    };
}

macro_rules! impl_client_delete {
    ($client_name:ident, $entity:ty, $error:ident, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(|e| match e {
                        $crate::actor_framework::FrameworkError::NotFound(id) => $error::NotFound(id),
                        other => $error::ActorCommunicationError(other.to_string()),
                    })
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ident, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_get!($client_name, $entity, $error, $entity_name_snake);
        impl_client_delete!($client_name, $entity, $error, $entity_name_snake);
    };
}

/// Generate request/response client methods over a service's mpsc channel with
/// automatic tracing. Parameter names must match the request variant's fields.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| $error_type::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| $error_type::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
