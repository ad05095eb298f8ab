//! Macros to reduce boilerplate in layer adapter implementations
//!
//! Hosts often hold their adapter behind a `Box` or lend it out as `&mut`.
//! These macros forward both boundary traits through such wrappers so the
//! controller can stay generic over the adapter type.

/// Forwards [`OverlaySurface`](crate::layers::adapter::OverlaySurface) and
/// [`MapLayerAdapter`](crate::layers::adapter::MapLayerAdapter) through a
/// pointer-like wrapper.
///
/// Usage:
/// ```ignore
/// forward_layer_adapter!(Box<T>);
/// ```
#[macro_export]
macro_rules! forward_layer_adapter {
    ($wrapper:ty) => {
        impl<T> $crate::layers::adapter::OverlaySurface for $wrapper
        where
            T: $crate::layers::adapter::OverlaySurface + ?Sized,
        {
            fn add_overlay(
                &mut self,
                shape: $crate::layers::adapter::OverlayShape,
            ) -> $crate::Result<$crate::layers::adapter::OverlayId> {
                (**self).add_overlay(shape)
            }

            fn update_overlay(
                &mut self,
                id: $crate::layers::adapter::OverlayId,
                shape: $crate::layers::adapter::OverlayShape,
            ) -> $crate::Result<()> {
                (**self).update_overlay(id, shape)
            }

            fn remove_overlay(&mut self, id: $crate::layers::adapter::OverlayId) {
                (**self).remove_overlay(id)
            }
        }

        impl<T> $crate::layers::adapter::MapLayerAdapter for $wrapper
        where
            T: $crate::layers::adapter::MapLayerAdapter + ?Sized,
        {
            fn sync_layer(&mut self, pixels: &[$crate::state::pixels::Pixel]) -> $crate::Result<()> {
                (**self).sync_layer(pixels)
            }

            fn project(&self, coordinate: $crate::core::geo::LatLng) -> $crate::core::geo::Point {
                (**self).project(coordinate)
            }
        }
    };
}
