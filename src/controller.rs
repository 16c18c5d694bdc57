//! State of the photo screen, and wiring of the platform services.

use crate::{
    config::Config,
    content::Size,
    filter::{FilterPreset, FilterService},
    image::{AspectFitResizer, Image, Orientation},
    notification::{Attachment, AuthorizationOptions, NotificationCenter, NotificationRequest},
    services::{Camera, PhotoLibrary, SharePayload, ShareSheet},
    MyCameraError,
};
use log::{debug, trace, warn};

/// Platform services used by a [`CameraController`].
#[derive(Debug)]
pub struct Services<C, L, F, S, N> {
    /// Capture device.
    pub camera: C,
    /// Storage of captured photos.
    pub library: L,
    /// Filter implementation.
    pub filters: F,
    /// Share sheet.
    pub share_sheet: S,
    /// Notification scheduler.
    pub notifications: N,
}

/// Owner of the photo screen state: the captured image, the selected filter
/// and the displayed result.
///
/// The host forwards user actions to the matching method and hands capture
/// results to [`Self::did_capture`].
#[derive(Debug)]
pub struct CameraController<C, L, F, S, N> {
    config: Config,
    resizer: AspectFitResizer,
    services: Services<C, L, F, S, N>,
    original: Option<Image>,
    displayed: Option<Image>,
    selected_filter: FilterPreset,
    notifications_authorized: bool,
}

impl<C, L, F, S, N> CameraController<C, L, F, S, N>
where
    C: Camera,
    L: PhotoLibrary,
    F: FilterService,
    S: ShareSheet,
    N: NotificationCenter,
{
    /// Create a controller with no photo.
    #[must_use]
    pub fn new(config: Config, services: Services<C, L, F, S, N>) -> Self {
        let resizer = AspectFitResizer::new(config.resample_filter);
        Self {
            config,
            resizer,
            services,
            original: None,
            displayed: None,
            selected_filter: FilterPreset::None,
            notifications_authorized: false,
        }
    }

    /// Ask permission to post badge, sound and alert notifications.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::Notification`] if the request failed.
    pub fn authorize_notifications(&mut self) -> Result<bool, MyCameraError> {
        let granted = self
            .services
            .notifications
            .request_authorization(AuthorizationOptions::ALL)?;
        debug!("notification authorization granted: {granted}");
        self.notifications_authorized = granted;
        Ok(granted)
    }

    /// Open the camera to take a photo.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::CameraUnavailable`] if there is no usable camera.
    pub fn request_capture(&mut self) -> Result<(), MyCameraError> {
        if !self.services.camera.is_available() {
            warn!("camera is not available");
            return Err(MyCameraError::CameraUnavailable);
        }
        self.services.camera.present();
        Ok(())
    }

    /// Handle a photo taken with the camera.
    ///
    /// The photo orientation is baked into its pixels, it becomes the
    /// displayed image, the filter selection is reset and the photo is saved
    /// in the library. A library failure is logged and doesn't fail the capture.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::Transform`] if the photo is empty, whatever
    /// its orientation. The current photo is kept and nothing is saved then.
    pub fn did_capture(&mut self, image: Image) -> Result<(), MyCameraError> {
        image.check_valid()?;
        let image = if image.orientation() == Orientation::Up {
            image
        } else {
            image.normalized()?
        };
        trace!("captured {} image at scale {}", image.size(), image.scale());

        if let Err(err) = self.services.library.save(&image) {
            warn!("saving photo in library failed: {err}");
        }
        self.selected_filter = FilterPreset::None;
        self.displayed = Some(image.clone());
        self.original = Some(image);
        Ok(())
    }

    /// Select the filter after the current one and display its result.
    ///
    /// Return the new selection, or `None` without change if there is no
    /// photo or if the last filter is already selected.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::Filter`] if the filter service failed,
    /// the selection is then left unchanged.
    pub fn next_filter(&mut self) -> Result<Option<FilterPreset>, MyCameraError> {
        let next = self.selected_filter.next();
        self.select_filter(next)
    }

    /// Select the filter before the current one and display its result.
    ///
    /// Return the new selection, or `None` without change if there is no
    /// photo or if the first filter is already selected.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::Filter`] if the filter service failed,
    /// the selection is then left unchanged.
    pub fn previous_filter(&mut self) -> Result<Option<FilterPreset>, MyCameraError> {
        let previous = self.selected_filter.previous();
        self.select_filter(previous)
    }

    fn select_filter(
        &mut self,
        preset: Option<FilterPreset>,
    ) -> Result<Option<FilterPreset>, MyCameraError> {
        let (Some(original), Some(preset)) = (&self.original, preset) else {
            return Ok(None);
        };
        let filtered = self.services.filters.apply(original, preset)?;
        debug!("filter {preset} selected");
        self.selected_filter = preset;
        self.displayed = Some(filtered);
        Ok(Some(preset))
    }

    /// Share the displayed image, fitted in `frame`, with the configured caption.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::NoImage`] if no photo was taken.
    /// Will return [`MyCameraError::Transform`] if the resize failed.
    pub fn share(&mut self, frame: Size) -> Result<(), MyCameraError> {
        let Some(displayed) = &self.displayed else {
            warn!("no photo to share");
            return Err(MyCameraError::NoImage);
        };
        let image = self.resizer.resize(displayed, frame)?;
        self.services.share_sheet.present(SharePayload {
            caption: self.config.share_caption.clone(),
            image,
        });
        Ok(())
    }

    /// Schedule the configured local notification, with a thumbnail of the
    /// displayed image if there is one.
    ///
    /// A thumbnail which can't be written is logged and left out.
    ///
    /// # Errors
    ///
    /// Will return [`MyCameraError::Notification`] if the request is refused.
    pub fn schedule_notification(&mut self) -> Result<(), MyCameraError> {
        let attachments = self
            .displayed
            .as_ref()
            .and_then(|image| {
                Attachment::create(image, &self.resizer, &self.config.attachment)
                    .inspect_err(|err| warn!("notification thumbnail skipped: {err}"))
                    .ok()
            })
            .into_iter()
            .collect();

        let request = NotificationRequest::from_config(&self.config.notification, attachments);
        if !self.notifications_authorized {
            debug!("scheduling notification without granted authorization");
        }
        self.services.notifications.add(request)?;
        Ok(())
    }

    /// Cancel the pending notification, and remove it from display if delivered.
    pub fn clear_notifications(&mut self) {
        let identifiers = [self.config.notification.identifier.as_str()];
        self.services.notifications.remove_pending(&identifiers);
        self.services.notifications.remove_delivered(&identifiers);
    }
}

impl<C, L, F, S, N> CameraController<C, L, F, S, N> {
    /// The captured photo, orientation applied, without filter.
    #[must_use]
    pub const fn original_image(&self) -> Option<&Image> {
        self.original.as_ref()
    }

    /// The photo as displayed, with the selected filter applied.
    #[must_use]
    pub const fn displayed_image(&self) -> Option<&Image> {
        self.displayed.as_ref()
    }

    /// The selected filter.
    #[must_use]
    pub const fn selected_filter(&self) -> FilterPreset {
        self.selected_filter
    }

    /// Whether notification authorization was granted.
    #[must_use]
    pub const fn notifications_authorized(&self) -> bool {
        self.notifications_authorized
    }

    /// The settings in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The platform services.
    #[must_use]
    pub const fn services(&self) -> &Services<C, L, F, S, N> {
        &self.services
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraController, Services};
    use crate::{
        config::{AttachmentConfig, Config},
        content::Size,
        filter::{FilterError, FilterPreset, FilterService, ImageOpsFilter},
        image::{resize, Image, Orientation, TransformError},
        notification::{
            AuthorizationOptions, NotificationCenter, NotificationError, NotificationRequest,
        },
        services::{Camera, PhotoLibrary, ServiceError, SharePayload, ShareSheet},
        MyCameraError,
    };
    use image::{Rgba, RgbaImage};

    #[derive(Debug, Default)]
    struct FakeCamera {
        available: bool,
        presented: usize,
    }

    impl Camera for FakeCamera {
        fn is_available(&self) -> bool {
            self.available
        }
        fn present(&mut self) {
            self.presented += 1;
        }
    }

    #[derive(Debug, Default)]
    struct FakeLibrary {
        saved: Vec<Image>,
        fail: bool,
    }

    impl PhotoLibrary for FakeLibrary {
        fn save(&mut self, image: &Image) -> Result<(), ServiceError> {
            if self.fail {
                return Err(ServiceError {
                    service: "library",
                    reason: "full".into(),
                });
            }
            self.saved.push(image.clone());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakeShareSheet {
        shared: Vec<SharePayload>,
    }

    impl ShareSheet for FakeShareSheet {
        fn present(&mut self, payload: SharePayload) {
            self.shared.push(payload);
        }
    }

    #[derive(Debug, Default)]
    struct FakeCenter {
        granted: bool,
        requests: Vec<NotificationRequest>,
        removed_pending: Vec<String>,
        removed_delivered: Vec<String>,
    }

    impl NotificationCenter for FakeCenter {
        fn request_authorization(
            &mut self,
            options: AuthorizationOptions,
        ) -> Result<bool, NotificationError> {
            assert_eq!(options, AuthorizationOptions::ALL);
            Ok(self.granted)
        }
        fn add(&mut self, request: NotificationRequest) -> Result<(), NotificationError> {
            self.requests.push(request);
            Ok(())
        }
        fn remove_pending(&mut self, identifiers: &[&str]) {
            self.removed_pending
                .extend(identifiers.iter().map(|id| (*id).to_owned()));
        }
        fn remove_delivered(&mut self, identifiers: &[&str]) {
            self.removed_delivered
                .extend(identifiers.iter().map(|id| (*id).to_owned()));
        }
    }

    /// Filter service which always fails.
    struct BrokenFilter;

    impl FilterService for BrokenFilter {
        fn apply(&self, _: &Image, preset: FilterPreset) -> Result<Image, FilterError> {
            Err(FilterError::Failed {
                preset,
                reason: "no gpu".into(),
            })
        }
    }

    type Controller<F> =
        CameraController<FakeCamera, FakeLibrary, F, FakeShareSheet, FakeCenter>;

    fn controller_with<F: FilterService>(filters: F, config: Config) -> Controller<F> {
        let _ = env_logger::builder().is_test(true).try_init();
        CameraController::new(
            config,
            Services {
                camera: FakeCamera {
                    available: true,
                    presented: 0,
                },
                library: FakeLibrary::default(),
                filters,
                share_sheet: FakeShareSheet::default(),
                notifications: FakeCenter {
                    granted: true,
                    ..FakeCenter::default()
                },
            },
        )
    }

    fn controller(dir: &tempfile::TempDir) -> Controller<ImageOpsFilter> {
        let config = Config {
            attachment: AttachmentConfig {
                directory: Some(dir.path().to_owned()),
                ..AttachmentConfig::default()
            },
            ..Config::default()
        };
        controller_with(ImageOpsFilter::default(), config)
    }

    /// 300x100 photo stored sideways, as a portrait capture.
    fn photo() -> Image {
        let pixels = RgbaImage::from_pixel(100, 300, Rgba([180, 60, 20, 255]));
        Image::new(pixels, 1., Orientation::Right).unwrap()
    }

    #[test]
    fn capture_needs_camera() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.request_capture().unwrap();
        assert_eq!(controller.services().camera.presented, 1);

        controller.services.camera.available = false;
        assert!(matches!(
            controller.request_capture(),
            Err(MyCameraError::CameraUnavailable)
        ));
        assert_eq!(controller.services().camera.presented, 1);
    }

    #[test]
    fn capture_normalizes_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.did_capture(photo()).unwrap();

        let original = controller.original_image().unwrap();
        assert_eq!(original.orientation(), Orientation::Up);
        assert_eq!(original.pixels().dimensions(), (300, 100));
        assert_eq!(controller.displayed_image(), Some(original));
        assert_eq!(controller.services().library.saved, vec![original.clone()]);
        assert_eq!(controller.selected_filter(), FilterPreset::None);
    }

    #[test]
    fn capture_rejects_empty_photo() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        let square = Image::new(RgbaImage::new(10, 10), 1., Orientation::Up).unwrap();
        let empty = resize(&square, Size::ZERO).unwrap();
        assert_eq!(empty.orientation(), Orientation::Up);

        assert!(matches!(
            controller.did_capture(empty),
            Err(MyCameraError::Transform(TransformError::InvalidImage { .. }))
        ));
        assert!(controller.displayed_image().is_none());
        assert!(controller.original_image().is_none());
        assert!(controller.services().library.saved.is_empty());
    }

    #[test]
    fn capture_survives_library_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.services.library.fail = true;
        controller.did_capture(photo()).unwrap();
        assert!(controller.displayed_image().is_some());
        assert!(controller.services().library.saved.is_empty());
    }

    #[test]
    fn swipe_without_photo_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        assert_eq!(controller.next_filter().unwrap(), None);
        assert_eq!(controller.previous_filter().unwrap(), None);
        assert_eq!(controller.selected_filter(), FilterPreset::None);
        assert!(controller.displayed_image().is_none());
    }

    #[test]
    fn swipe_through_filters() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.did_capture(photo()).unwrap();

        assert_eq!(controller.previous_filter().unwrap(), None);
        assert_eq!(controller.next_filter().unwrap(), Some(FilterPreset::Mono));
        let displayed = controller.displayed_image().unwrap();
        assert_ne!(Some(displayed), controller.original_image());
        let [r, g, b, _] = displayed.pixels().get_pixel(0, 0).0;
        assert!(r == g && g == b);

        assert_eq!(controller.next_filter().unwrap(), Some(FilterPreset::Sepia));
        assert_eq!(
            controller.next_filter().unwrap(),
            Some(FilterPreset::LineOverlay)
        );
        assert_eq!(controller.next_filter().unwrap(), None);
        assert_eq!(controller.selected_filter(), FilterPreset::LineOverlay);

        assert_eq!(controller.previous_filter().unwrap(), Some(FilterPreset::Sepia));
        assert_eq!(controller.previous_filter().unwrap(), Some(FilterPreset::Mono));
        assert_eq!(controller.previous_filter().unwrap(), Some(FilterPreset::None));
        assert_eq!(controller.displayed_image(), controller.original_image());
    }

    #[test]
    fn new_capture_resets_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.did_capture(photo()).unwrap();
        controller.next_filter().unwrap();
        controller.did_capture(photo()).unwrap();
        assert_eq!(controller.selected_filter(), FilterPreset::None);
        assert_eq!(controller.displayed_image(), controller.original_image());
    }

    #[test]
    fn failed_filter_keeps_selection() {
        let mut controller = controller_with(BrokenFilter, Config::default());
        controller.did_capture(photo()).unwrap();
        assert!(matches!(
            controller.next_filter(),
            Err(MyCameraError::Filter(FilterError::Failed { .. }))
        ));
        assert_eq!(controller.selected_filter(), FilterPreset::None);
        assert_eq!(controller.displayed_image(), controller.original_image());
    }

    #[test]
    fn share_needs_photo() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        assert!(matches!(
            controller.share(Size::new(375., 500.)),
            Err(MyCameraError::NoImage)
        ));
        assert!(controller.services().share_sheet.shared.is_empty());
    }

    #[test]
    fn share_fits_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.did_capture(photo()).unwrap();
        controller.share(Size::new(150., 150.)).unwrap();

        let shared = &controller.services().share_sheet.shared;
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].caption, "#MyCameraApp");
        assert_eq!(shared[0].image.size(), Size::new(150., 50.));
    }

    #[test]
    fn notification_with_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        assert!(controller.authorize_notifications().unwrap());
        assert!(controller.notifications_authorized());
        controller.did_capture(photo()).unwrap();
        controller.schedule_notification().unwrap();

        let requests = &controller.services().notifications.requests;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].identifier, "my_interval");
        let attachments = &requests[0].content.attachments;
        assert_eq!(attachments.len(), 1);
        assert!(attachments[0].path().starts_with(dir.path()));
        let thumbnail = image::open(attachments[0].path()).unwrap().to_rgba8();
        assert_eq!(thumbnail.dimensions(), (120, 40));
    }

    #[test]
    fn notification_without_photo() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.schedule_notification().unwrap();
        let requests = &controller.services().notifications.requests;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].content.attachments.is_empty());
    }

    #[test]
    fn notification_with_unwritable_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        // a file where the attachment folder should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let config = Config {
            attachment: AttachmentConfig {
                directory: Some(blocker),
                ..AttachmentConfig::default()
            },
            ..Config::default()
        };
        let mut controller = controller_with(ImageOpsFilter::default(), config);
        controller.did_capture(photo()).unwrap();
        controller.schedule_notification().unwrap();

        let requests = &controller.services().notifications.requests;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].content.attachments.is_empty());
    }

    #[test]
    fn clear_removes_pending_and_delivered() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.clear_notifications();
        let center = &controller.services().notifications;
        assert_eq!(center.removed_pending, vec!["my_interval".to_owned()]);
        assert_eq!(center.removed_delivered, vec!["my_interval".to_owned()]);
    }
}
