//! # Warehouse Catalog
//!
//! The built-in catalog of thing states used by the warehouse services.
//! Every atomic state is a typed constant; every named composite is a
//! [`NamedComposite`] handle resolved against the shared [`Registry`].
//!
//! ## Persisted Ids
//!
//! Ids are the integers already stored for units and are frozen. Most are
//! powers of two, left over from a bit-flag era, and the export and import
//! basket states use small sequential integers. No bit arithmetic is
//! applied to them anywhere: an id is an opaque key.
//!
//! ## Declaration Order
//!
//! Atomics are declared first, then composites. A composite may only name
//! states declared above it, which [`Registry::build`] enforces. The shared
//! registry is built lazily on first use and never changes afterwards.
//!
//! ```
//! use tstate_core::warehouse::{HELD_IN_SHELF, HELD_IN_SHELF_FOR_EXPORT, WITH_CUSTOMER};
//! use tstate_core::StateSet;
//!
//! assert!(HELD_IN_SHELF.is_superset_of(&HELD_IN_SHELF_FOR_EXPORT));
//! assert!(!HELD_IN_SHELF.has_any_overlap(&WITH_CUSTOMER));
//! ```

use std::ops::BitOr;
use std::sync::OnceLock;

use crate::atomic::AtomicState;
use crate::catalog::{Catalog, CatalogBuilder};
use crate::composite::CompositeState;
use crate::identity::StateId;
use crate::registry::Registry;
use crate::state::{StateSet, ThingState};

/// Declares the warehouse atomics as constants, the named composites as
/// [`NamedComposite`] handles, and [`catalog`] as the matching table.
macro_rules! warehouse_catalog {
    (@atomic $builder:ident, $name:ident, $id:literal) => {
        $builder.atomic(stringify!($name), $id)
    };
    (@atomic $builder:ident, $name:ident, $id:literal, retired) => {
        $builder.deprecated_atomic(stringify!($name), $id)
    };
    (
        atomics {
            $(
                $(#[$meta:meta])*
                $name:ident => $konst:ident = $id:literal $(, $retired:ident)?;
            )+
        }

        composites {
            $(
                $(#[$cmeta:meta])*
                $cname:ident => $cconst:ident = [$($member:ident),+ $(,)?];
            )+
        }
    ) => {
        $(
            $(#[$meta])*
            #[doc = concat!("`", stringify!($name), "`, persisted as `", stringify!($id), "`.")]
            pub const $konst: AtomicState = AtomicState::declare($id);
        )+

        $(
            $(#[$cmeta])*
            #[doc = concat!("`", stringify!($cname), "`.")]
            pub const $cconst: NamedComposite = NamedComposite::declare(stringify!($cname));
        )+

        /// The warehouse declaration table, in declaration order.
        pub fn catalog() -> Catalog {
            let builder = CatalogBuilder::new();
            $(
                let builder = warehouse_catalog!(@atomic builder, $name, $id $(, $retired)?);
            )+
            builder
                .composites()
                $(
                    .composite(stringify!($cname), [$(stringify!($member)),+])
                )+
                .finish()
        }
    };
}

warehouse_catalog! {
    atomics {
        // Intake and sorting
        InPrimordialSoup => IN_PRIMORDIAL_SOUP = 0;
        InIncomingZone => IN_INCOMING_ZONE = 1;
        InIncomingHoldZone => IN_INCOMING_HOLD_ZONE = 2_251_799_813_685_248;
        InPreSortingZone => IN_PRE_SORTING_ZONE = 137_438_953_472;
        InIntakeProcessingZone => IN_INTAKE_PROCESSING_ZONE = 2;
        InTransferZone => IN_TRANSFER_ZONE = 4;
        InReturnReshelvingZone => IN_RETURN_RESHELVING_ZONE = 274_877_906_944;
        InTransmutationZone => IN_TRANSMUTATION_ZONE = 4_503_599_627_370_496;

        // Disposal and recall
        InJunkyard => IN_JUNKYARD = 8;
        InNarnia => IN_NARNIA = 16;
        InGraveyard => IN_GRAVEYARD = 32;
        InRecycleTransit => IN_RECYCLE_TRANSIT = 64;
        InRecycleZone => IN_RECYCLE_ZONE = 128;
        InRecallTransit => IN_RECALL_TRANSIT = 68_719_476_736;

        // Shelf
        AvailableInShelf => AVAILABLE_IN_SHELF = 256;
        ExcessAvailableInShelf => EXCESS_AVAILABLE_IN_SHELF = 34_359_738_368;
        FlaggedMissingInShelf => FLAGGED_MISSING_IN_SHELF = 512;
        FlaggedDamagedInShelf => FLAGGED_DAMAGED_IN_SHELF = 1_024;
        FlaggedExpiredInShelf => FLAGGED_EXPIRED_IN_SHELF = 2_048;

        // Returns
        UninspectedInVendorReturnZone => UNINSPECTED_IN_VENDOR_RETURN_ZONE = 33_554_432;
        InReturnZoneNeverAssigned => IN_RETURN_ZONE_NEVER_ASSIGNED = 67_108_864;
        InReturnZoneCancelledWhilePicking => IN_RETURN_ZONE_CANCELLED_WHILE_PICKING = 134_217_728;
        InReturnZoneCancelledBeforeDispatch => IN_RETURN_ZONE_CANCELLED_BEFORE_DISPATCH = 562_949_953_421_312;
        InReturnZoneReturnedFromDelivery => IN_RETURN_ZONE_RETURNED_FROM_DELIVERY = 1_125_899_906_842_624;
        PendingReturnInVendorReturnZone => PENDING_RETURN_IN_VENDOR_RETURN_ZONE = 1_073_741_824;
        InReturnTransit => IN_RETURN_TRANSIT = 8_589_934_592;
        ReportedMissingWithCustomer => REPORTED_MISSING_WITH_CUSTOMER = 17_179_869_184;
        TransmutedOut => TRANSMUTED_OUT = 9_007_199_254_740_992;

        // Shelving
        InTransferZoneWithShelfAssignment => IN_TRANSFER_ZONE_WITH_SHELF_ASSIGNMENT = 1_099_511_627_776;
        InReturnReshelvingZoneWithShelfAssignment => IN_RETURN_RESHELVING_ZONE_WITH_SHELF_ASSIGNMENT = 2_199_023_255_552;
        InTransferZoneWithNoShelfAssigned => IN_TRANSFER_ZONE_WITH_NO_SHELF_ASSIGNED = 4_398_046_511_104;
        InReturnReshelvingZoneWithNoShelfAssigned => IN_RETURN_RESHELVING_ZONE_WITH_NO_SHELF_ASSIGNED = 8_796_093_022_208;
        InTransferZoneWithNoShelfSpaceFound => IN_TRANSFER_ZONE_WITH_NO_SHELF_SPACE_FOUND = 17_592_186_044_416;
        InTransferZoneWithNoStaticShelfAssignment => IN_TRANSFER_ZONE_WITH_NO_STATIC_SHELF_ASSIGNMENT = 35_184_372_088_832;
        InReturnReshelvingZoneWithNoShelfSpaceFound => IN_RETURN_RESHELVING_ZONE_WITH_NO_SHELF_SPACE_FOUND = 70_368_744_177_664;
        InReturnReshelvingZoneWithNoStaticShelfAssignment => IN_RETURN_RESHELVING_ZONE_WITH_NO_STATIC_SHELF_ASSIGNMENT = 140_737_488_355_328;
        HeldInShelfForTransitionToDifferentShipment => HELD_IN_SHELF_FOR_TRANSITION_TO_DIFFERENT_SHIPMENT = 281_474_976_710_656;
        InReturnZoneCancelledAfterImport => IN_RETURN_ZONE_CANCELLED_AFTER_IMPORT = 288_230_376_151_711_744;
        InPerishableTransit => IN_PERISHABLE_TRANSIT = 4_611_686_018_427_387_904;

        // Fulfilment
        HeldInShelfForExport => HELD_IN_SHELF_FOR_EXPORT = 4_096;
        HeldInShelfForLocal => HELD_IN_SHELF_FOR_LOCAL = 8_192;
        InPurchaseZoneForLocal => IN_PURCHASE_ZONE_FOR_LOCAL = 65_536;
        #[deprecated(note = "retired; still accepted for persisted units")]
        InPurchaseZoneForExport => IN_PURCHASE_ZONE_FOR_EXPORT = 16_777_216, retired;
        InPurchaseZoneUnassigned => IN_PURCHASE_ZONE_UNASSIGNED = 268_435_456;
        InBasket => IN_BASKET = 16_384;
        InReadyBasket => IN_READY_BASKET = 549_755_813_888;
        #[deprecated(note = "retired; still accepted for persisted units")]
        InExportBasket => IN_EXPORT_BASKET = 32_768, retired;
        InTransportAssigned => IN_TRANSPORT_ASSIGNED = 131_072;
        InTransportPreviouslyAssigned => IN_TRANSPORT_PREVIOUSLY_ASSIGNED = 4_294_967_296;
        PendingMarketPurchaseForLocal => PENDING_MARKET_PURCHASE_FOR_LOCAL = 262_144;
        #[deprecated(note = "retired; still accepted for persisted units")]
        PendingMarketPurchaseForExport => PENDING_MARKET_PURCHASE_FOR_EXPORT = 8_388_608, retired;
        PendingMarketPurchaseForDeficit => PENDING_MARKET_PURCHASE_FOR_DEFICIT = 536_870_912;
        WithCustomer => WITH_CUSTOMER = 1_048_576;
        FailedMarketPurchase => FAILED_MARKET_PURCHASE = 2_097_152;
        CancelledMarketPurchase => CANCELLED_MARKET_PURCHASE = 4_194_304;
        SentBackToVendor => SENT_BACK_TO_VENDOR = 2_147_483_648;

        // Export warehouse (sequential ids)
        ReservedInShelfForExport => RESERVED_IN_SHELF_FOR_EXPORT = 3;
        InCartonTransferZone => IN_CARTON_TRANSFER_ZONE = 5;
        InCartonTransferZoneWithShelfAssignment => IN_CARTON_TRANSFER_ZONE_WITH_SHELF_ASSIGNMENT = 6;
        InCartonTransferZoneWithNoShelfSpaceFound => IN_CARTON_TRANSFER_ZONE_WITH_NO_SHELF_SPACE_FOUND = 7;
        InCartonTransferZoneWithNoStaticShelfAssignment => IN_CARTON_TRANSFER_ZONE_WITH_NO_STATIC_SHELF_ASSIGNMENT = 9;
        InCartonTransferZoneWithNoShelfAssigned => IN_CARTON_TRANSFER_ZONE_WITH_NO_SHELF_ASSIGNED = 10;
        AvailableInCartonForExport => AVAILABLE_IN_CARTON_FOR_EXPORT = 11;
        HeldInCartonForExport => HELD_IN_CARTON_FOR_EXPORT = 12;
        ReservedInCartonForExport => RESERVED_IN_CARTON_FOR_EXPORT = 13;
        AvailableInUnboxingZoneForExport => AVAILABLE_IN_UNBOXING_ZONE_FOR_EXPORT = 14;
        HeldInUnboxingZoneForExport => HELD_IN_UNBOXING_ZONE_FOR_EXPORT = 15;
        ReservedInUnboxingZoneForExport => RESERVED_IN_UNBOXING_ZONE_FOR_EXPORT = 17;
        HeldInExportWarehouseDispatchZone => HELD_IN_EXPORT_WAREHOUSE_DISPATCH_ZONE = 18;
        ReservedInExportWarehouseDispatchZone => RESERVED_IN_EXPORT_WAREHOUSE_DISPATCH_ZONE = 19;

        // Import basket
        HeldInImportBasket => HELD_IN_IMPORT_BASKET = 20;
        HeldInImportBasketWithShelfAssignment => HELD_IN_IMPORT_BASKET_WITH_SHELF_ASSIGNMENT = 21;
        HeldInImportBasketWithNoShelfSpaceFound => HELD_IN_IMPORT_BASKET_WITH_NO_SHELF_SPACE_FOUND = 22;
        HeldInImportBasketWithNoStaticShelfAssignment => HELD_IN_IMPORT_BASKET_WITH_NO_STATIC_SHELF_ASSIGNMENT = 23;
        HeldInImportBasketWithNoShelfAssigned => HELD_IN_IMPORT_BASKET_WITH_NO_SHELF_ASSIGNED = 30;
        AvailableInImportBasket => AVAILABLE_IN_IMPORT_BASKET = 24;
        AvailableInImportBasketWithShelfAssignment => AVAILABLE_IN_IMPORT_BASKET_WITH_SHELF_ASSIGNMENT = 25;
        AvailableInImportBasketWithNoShelfSpaceFound => AVAILABLE_IN_IMPORT_BASKET_WITH_NO_SHELF_SPACE_FOUND = 26;
        AvailableInImportBasketWithNoStaticShelfAssignment => AVAILABLE_IN_IMPORT_BASKET_WITH_NO_STATIC_SHELF_ASSIGNMENT = 27;
        AvailableInImportBasketWithNoShelfAssigned => AVAILABLE_IN_IMPORT_BASKET_WITH_NO_SHELF_ASSIGNED = 31;
        AvailableInImportOverflowZone => AVAILABLE_IN_IMPORT_OVERFLOW_ZONE = 28;
        HeldInImportOverflowZone => HELD_IN_IMPORT_OVERFLOW_ZONE = 29;
    }

    composites {
        ReservedForExportInExportWarehouse => RESERVED_FOR_EXPORT_IN_EXPORT_WAREHOUSE = [
            ReservedInShelfForExport,
            ReservedInCartonForExport,
            ReservedInUnboxingZoneForExport,
            ReservedInExportWarehouseDispatchZone,
        ];
        AssignedToShipmentInExportWarehouse => ASSIGNED_TO_SHIPMENT_IN_EXPORT_WAREHOUSE = [
            HeldInShelfForExport,
            HeldInCartonForExport,
            HeldInUnboxingZoneForExport,
            HeldInExportWarehouseDispatchZone,
        ];
        AssignedToShipmentInImportBasket => ASSIGNED_TO_SHIPMENT_IN_IMPORT_BASKET = [
            HeldInImportBasket,
            HeldInImportBasketWithShelfAssignment,
            HeldInImportBasketWithNoShelfSpaceFound,
            HeldInImportBasketWithNoStaticShelfAssignment,
            HeldInImportBasketWithNoShelfAssigned,
        ];
        UnassignedInImportBasket => UNASSIGNED_IN_IMPORT_BASKET = [
            AvailableInImportBasket,
            AvailableInImportBasketWithShelfAssignment,
            AvailableInImportBasketWithNoShelfSpaceFound,
            AvailableInImportBasketWithNoStaticShelfAssignment,
            AvailableInImportBasketWithNoShelfAssigned,
        ];
        AvailableForPurchaseInExportWarehouse => AVAILABLE_FOR_PURCHASE_IN_EXPORT_WAREHOUSE = [
            AvailableInShelf,
            ExcessAvailableInShelf,
            AvailableInCartonForExport,
            AvailableInUnboxingZoneForExport,
        ];
        InReturnZonePreviouslyAssigned => IN_RETURN_ZONE_PREVIOUSLY_ASSIGNED = [
            InReturnZoneCancelledWhilePicking,
            InReturnZoneCancelledBeforeDispatch,
            InReturnZoneReturnedFromDelivery,
            InReturnZoneCancelledAfterImport,
        ];
        HeldInShelf => HELD_IN_SHELF = [HeldInShelfForExport, HeldInShelfForLocal];
        InImportOverflowZone => IN_IMPORT_OVERFLOW_ZONE = [
            HeldInImportOverflowZone,
            AvailableInImportOverflowZone,
        ];
        InTransport => IN_TRANSPORT = [InTransportAssigned, InTransportPreviouslyAssigned];
        InPurchaseZone => IN_PURCHASE_ZONE = [InPurchaseZoneForLocal, InPurchaseZoneUnassigned];
        FlaggedForReview => FLAGGED_FOR_REVIEW = [
            FlaggedDamagedInShelf,
            FlaggedExpiredInShelf,
            FlaggedMissingInShelf,
        ];
        UnassignedInWarehouse => UNASSIGNED_IN_WAREHOUSE = [
            InIncomingZone,
            InIncomingHoldZone,
            InPreSortingZone,
            InIntakeProcessingZone,
            InTransferZone,
            InTransmutationZone,
            InJunkyard,
            InNarnia,
            InGraveyard,
            TransmutedOut,
            InReturnZonePreviouslyAssigned,
            InTransportPreviouslyAssigned,
            InReturnReshelvingZone,
            InPurchaseZoneUnassigned,
            InRecycleZone,
            AvailableInShelf,
            ExcessAvailableInShelf,
            FlaggedForReview,
            InRecycleTransit,
            InRecallTransit,
            UninspectedInVendorReturnZone,
            InReturnZoneNeverAssigned,
            PendingReturnInVendorReturnZone,
            InTransferZoneWithShelfAssignment,
            InReturnReshelvingZoneWithShelfAssignment,
            InTransferZoneWithNoShelfSpaceFound,
            InTransferZoneWithNoStaticShelfAssignment,
            InPerishableTransit,
            AvailableInCartonForExport,
            AvailableInUnboxingZoneForExport,
            ReservedForExportInExportWarehouse,
            UnassignedInImportBasket,
            AvailableInImportOverflowZone,
            InCartonTransferZone,
            InCartonTransferZoneWithShelfAssignment,
            InCartonTransferZoneWithNoShelfSpaceFound,
            InCartonTransferZoneWithNoShelfAssigned,
            InCartonTransferZoneWithNoStaticShelfAssignment,
        ];
        AssignedToShipmentInWarehouse => ASSIGNED_TO_SHIPMENT_IN_WAREHOUSE = [
            HeldInShelf,
            InBasket,
            InReadyBasket,
            InPurchaseZoneForLocal,
            InTransportAssigned,
            AssignedToShipmentInExportWarehouse,
            AssignedToShipmentInImportBasket,
            HeldInImportOverflowZone,
        ];
        EnRouteToShelfFromTransferZone => EN_ROUTE_TO_SHELF_FROM_TRANSFER_ZONE = [
            InTransferZone,
            InTransferZoneWithNoShelfAssigned,
            InTransferZoneWithNoShelfSpaceFound,
            InTransferZoneWithNoStaticShelfAssignment,
            InTransferZoneWithShelfAssignment,
        ];
        InImportBasket => IN_IMPORT_BASKET = [
            HeldInImportBasket,
            HeldInImportBasketWithShelfAssignment,
            HeldInImportBasketWithNoShelfSpaceFound,
            HeldInImportBasketWithNoStaticShelfAssignment,
            HeldInImportBasketWithNoShelfAssigned,
            AvailableInImportBasket,
            AvailableInImportBasketWithShelfAssignment,
            AvailableInImportBasketWithNoShelfSpaceFound,
            AvailableInImportBasketWithNoStaticShelfAssignment,
            AvailableInImportBasketWithNoShelfAssigned,
        ];
        InImportBasketShelvingFailed => IN_IMPORT_BASKET_SHELVING_FAILED = [
            HeldInImportBasketWithNoShelfSpaceFound,
            AvailableInImportBasketWithNoShelfSpaceFound,
            HeldInImportBasketWithNoStaticShelfAssignment,
            AvailableInImportBasketWithNoStaticShelfAssignment,
        ];
        InImportBasketReadyForShelving => IN_IMPORT_BASKET_READY_FOR_SHELVING = [
            HeldInImportBasketWithShelfAssignment,
            AvailableInImportBasketWithShelfAssignment,
            HeldInImportBasketWithNoShelfAssigned,
            AvailableInImportBasketWithNoShelfAssigned,
        ];
        EnRouteToShelfFromImportBasket => EN_ROUTE_TO_SHELF_FROM_IMPORT_BASKET = [
            HeldInImportBasket,
            AvailableInImportBasket,
            InImportBasketReadyForShelving,
            InImportBasketShelvingFailed,
        ];
        EnRouteToShelfFromCartonTransferZone => EN_ROUTE_TO_SHELF_FROM_CARTON_TRANSFER_ZONE = [
            InCartonTransferZone,
            InCartonTransferZoneWithShelfAssignment,
            InCartonTransferZoneWithNoShelfSpaceFound,
            InCartonTransferZoneWithNoShelfAssigned,
            InCartonTransferZoneWithNoStaticShelfAssignment,
        ];
        InCartonShelf => IN_CARTON_SHELF = [
            AvailableInCartonForExport,
            HeldInCartonForExport,
            ReservedInCartonForExport,
        ];
        InCarton => IN_CARTON = [EnRouteToShelfFromCartonTransferZone, InCartonShelf];
        InExportWarehouse => IN_EXPORT_WAREHOUSE = [
            EnRouteToShelfFromCartonTransferZone,
            AvailableForPurchaseInExportWarehouse,
            ReservedForExportInExportWarehouse,
            AssignedToShipmentInExportWarehouse,
        ];
        PreviouslyAssignedToShipment => PREVIOUSLY_ASSIGNED_TO_SHIPMENT = [
            InTransportPreviouslyAssigned,
            InReturnZonePreviouslyAssigned,
            ReportedMissingWithCustomer,
            InReturnTransit,
        ];
        EnRouteToShelf => EN_ROUTE_TO_SHELF = [
            EnRouteToShelfFromTransferZone,
            InReturnReshelvingZone,
            InReturnReshelvingZoneWithNoShelfAssigned,
            InReturnReshelvingZoneWithNoShelfSpaceFound,
            InReturnReshelvingZoneWithNoStaticShelfAssignment,
            InReturnReshelvingZoneWithShelfAssignment,
            EnRouteToShelfFromImportBasket,
            InPerishableTransit,
            EnRouteToShelfFromCartonTransferZone,
        ];
        PendingMarketPurchase => PENDING_MARKET_PURCHASE = [
            PendingMarketPurchaseForLocal,
            PendingMarketPurchaseForDeficit,
        ];
        InWarehouse => IN_WAREHOUSE = [UnassignedInWarehouse, AssignedToShipmentInWarehouse];
        Imaginary => IMAGINARY = [
            PendingMarketPurchase,
            InPrimordialSoup,
            FailedMarketPurchase,
            CancelledMarketPurchase,
        ];
        AssignedToShipment => ASSIGNED_TO_SHIPMENT = [
            AssignedToShipmentInWarehouse,
            AssignedToShipmentInExportWarehouse,
            PendingMarketPurchaseForLocal,
            WithCustomer,
        ];
        InShelf => IN_SHELF = [
            AvailableInShelf,
            ExcessAvailableInShelf,
            HeldInShelf,
            FlaggedDamagedInShelf,
            FlaggedExpiredInShelf,
            FlaggedMissingInShelf,
            ReservedInShelfForExport,
        ];
        /// Alias of a single atomic. Registered as a composite all the same.
        InCartonUnshelvedButSpaceAssigned => IN_CARTON_UNSHELVED_BUT_SPACE_ASSIGNED = [
            InCartonTransferZoneWithShelfAssignment,
        ];
        UnshelvedButSpaceAssigned => UNSHELVED_BUT_SPACE_ASSIGNED = [
            InTransferZoneWithShelfAssignment,
            InReturnReshelvingZoneWithShelfAssignment,
            HeldInImportBasketWithShelfAssignment,
            AvailableInImportBasketWithShelfAssignment,
        ];

        // Context groupings used by query code.
        HasShipmentContext => HAS_SHIPMENT_CONTEXT = [
            AssignedToShipment,
            PreviouslyAssignedToShipment,
        ];
        HasWarehouseContext => HAS_WAREHOUSE_CONTEXT = [
            InWarehouse,
            EnRouteToShelf,
            CancelledMarketPurchase,
            FailedMarketPurchase,
            PendingMarketPurchase,
            InExportWarehouse,
        ];
        HasShelfContext => HAS_SHELF_CONTEXT = [
            InShelf,
            UnshelvedButSpaceAssigned,
            InCartonShelf,
            InCartonUnshelvedButSpaceAssigned,
        ];
        HasDestinationWarehouseContext => HAS_DESTINATION_WAREHOUSE_CONTEXT = [
            ReservedForExportInExportWarehouse,
        ];
        UnfulfilledForShipment => UNFULFILLED_FOR_SHIPMENT = [
            HeldInShelf,
            HeldInImportBasket,
            InPurchaseZone,
            PendingMarketPurchaseForLocal,
        ];

        ActiveThingState => ACTIVE_THING_STATE = [
            InIncomingZone,
            InIncomingHoldZone,
            InPreSortingZone,
            InIntakeProcessingZone,
            InTransferZone,
            InRecycleTransit,
            InRecallTransit,
            InRecycleZone,
            AvailableInShelf,
            ExcessAvailableInShelf,
            FlaggedMissingInShelf,
            FlaggedDamagedInShelf,
            FlaggedExpiredInShelf,
            HeldInShelfForLocal,
            HeldInShelfForExport,
            InReturnReshelvingZone,
            InBasket,
            InReadyBasket,
            InPurchaseZoneForLocal,
            InTransportAssigned,
            PendingMarketPurchaseForLocal,
            UninspectedInVendorReturnZone,
            InReturnZoneNeverAssigned,
            InReturnZonePreviouslyAssigned,
            InPurchaseZoneUnassigned,
            PendingMarketPurchaseForDeficit,
            PendingReturnInVendorReturnZone,
            InTransportPreviouslyAssigned,
            InReturnTransit,
            InPerishableTransit,
            InTransferZoneWithShelfAssignment,
            InReturnReshelvingZoneWithShelfAssignment,
            InTransferZoneWithNoShelfAssigned,
            InReturnReshelvingZoneWithNoShelfAssigned,
            InTransferZoneWithNoShelfSpaceFound,
            InTransferZoneWithNoStaticShelfAssignment,
            InReturnReshelvingZoneWithNoShelfSpaceFound,
            InReturnReshelvingZoneWithNoStaticShelfAssignment,
            HeldInImportOverflowZone,
            AvailableInImportOverflowZone,
            ReservedInShelfForExport,
            InCartonTransferZone,
            InCartonTransferZoneWithShelfAssignment,
            InCartonTransferZoneWithNoShelfSpaceFound,
            InCartonTransferZoneWithNoShelfAssigned,
            InCartonTransferZoneWithNoStaticShelfAssignment,
            AvailableInCartonForExport,
            HeldInCartonForExport,
            ReservedInCartonForExport,
            AvailableInUnboxingZoneForExport,
            HeldInUnboxingZoneForExport,
            ReservedInUnboxingZoneForExport,
            HeldInExportWarehouseDispatchZone,
            ReservedInExportWarehouseDispatchZone,
            HeldInImportBasket,
            AvailableInImportBasket,
            HeldInImportBasketWithShelfAssignment,
            AvailableInImportBasketWithShelfAssignment,
            HeldInImportBasketWithNoShelfSpaceFound,
            AvailableInImportBasketWithNoShelfSpaceFound,
            HeldInImportBasketWithNoStaticShelfAssignment,
            AvailableInImportBasketWithNoStaticShelfAssignment,
            HeldInImportBasketWithNoShelfAssigned,
            AvailableInImportBasketWithNoShelfAssigned,
        ];
        AvailableForPurchase => AVAILABLE_FOR_PURCHASE = [
            AvailableInShelf,
            ExcessAvailableInShelf,
            AvailableInImportOverflowZone,
        ];
        InTransferZoneOrReturnReshelvingZoneOrImportBasket => IN_TRANSFER_ZONE_OR_RETURN_RESHELVING_ZONE_OR_IMPORT_BASKET = [
            InTransferZone,
            InReturnReshelvingZone,
            HeldInImportBasket,
            AvailableInImportBasket,
        ];
        InTransferZoneOrReturnReshelvingZoneOrImportBasketWithNoShelfFound => IN_TRANSFER_ZONE_OR_RETURN_RESHELVING_ZONE_OR_IMPORT_BASKET_WITH_NO_SHELF_FOUND = [
            InTransferZoneWithNoStaticShelfAssignment,
            InTransferZoneWithNoShelfSpaceFound,
            InReturnReshelvingZoneWithNoShelfSpaceFound,
            InReturnReshelvingZoneWithNoStaticShelfAssignment,
            HeldInImportBasketWithNoShelfSpaceFound,
            AvailableInImportBasketWithNoShelfSpaceFound,
            HeldInImportBasketWithNoStaticShelfAssignment,
            AvailableInImportBasketWithNoStaticShelfAssignment,
        ];
        InCartonTransferZoneReadyForShelving => IN_CARTON_TRANSFER_ZONE_READY_FOR_SHELVING = [
            InCartonTransferZoneWithShelfAssignment,
            InCartonTransferZoneWithNoShelfAssigned,
        ];
        InCartonTransferZoneWithNoShelfFound => IN_CARTON_TRANSFER_ZONE_WITH_NO_SHELF_FOUND = [
            InCartonTransferZoneWithNoShelfSpaceFound,
            InCartonTransferZoneWithNoStaticShelfAssignment,
        ];
        InTransferZoneReadyForShelving => IN_TRANSFER_ZONE_READY_FOR_SHELVING = [
            InTransferZoneWithShelfAssignment,
            InTransferZoneWithNoShelfAssigned,
        ];
        InReturnZoneReadyForShelving => IN_RETURN_ZONE_READY_FOR_SHELVING = [
            InReturnReshelvingZoneWithShelfAssignment,
            InReturnReshelvingZoneWithNoShelfAssigned,
        ];
        InReturnReshelvingZoneWithNoShelf => IN_RETURN_RESHELVING_ZONE_WITH_NO_SHELF = [
            InReturnReshelvingZoneWithNoShelfAssigned,
            InReturnReshelvingZoneWithNoShelfSpaceFound,
            InReturnReshelvingZoneWithNoStaticShelfAssignment,
        ];
        /// Units a sourcing run may pick from.
        SourcingState => SOURCING_STATE = [
            InIncomingHoldZone,
            InPreSortingZone,
            PendingReturnInVendorReturnZone,
            UninspectedInVendorReturnZone,
            InTransferZoneWithShelfAssignment,
            InTransferZoneWithNoShelfAssigned,
            InTransferZoneWithNoShelfSpaceFound,
            InTransferZoneWithNoStaticShelfAssignment,
            InCartonTransferZoneWithShelfAssignment,
            InCartonTransferZoneWithNoShelfAssigned,
            InCartonTransferZoneWithNoShelfSpaceFound,
            InCartonTransferZoneWithNoStaticShelfAssignment,
            InImportBasket,
            InReturnReshelvingZoneWithShelfAssignment,
            InReturnReshelvingZoneWithNoShelfAssigned,
            InReturnReshelvingZoneWithNoShelfSpaceFound,
            InReturnReshelvingZoneWithNoStaticShelfAssignment,
            InRecycleTransit,
            InRecallTransit,
            FlaggedMissingInShelf,
            FlaggedDamagedInShelf,
            FlaggedExpiredInShelf,
        ];
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The shared registry for the warehouse catalog, built on first use.
///
/// # Panics
///
/// Panics if the built-in catalog violates catalog integrity. The table is
/// fixed at compile time and covered by tests, so this only fires on a bad
/// edit to the declarations above.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| match Registry::build(&catalog()) {
        Ok(registry) => registry,
        Err(violation) => panic!("warehouse catalog integrity violation: {violation}"),
    })
}

// ─── Named Composite Handles ────────────────────────────────────────

/// A `const` handle to a named composite of the warehouse catalog.
///
/// Composites cannot be built in a `const` context, so the constants hold
/// the name and resolve it against [`registry`] on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedComposite {
    name: &'static str,
}

impl NamedComposite {
    const fn declare(name: &'static str) -> Self {
        Self { name }
    }

    /// The catalog name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The resolved composite.
    pub fn state(&self) -> &'static CompositeState {
        match registry().composite_by_name(self.name) {
            Some(state) => state,
            // Handles are only produced by `warehouse_catalog!`, which also
            // declares the name in `catalog()`.
            None => unreachable!("composite {} missing from warehouse registry", self.name),
        }
    }
}

impl StateSet for NamedComposite {
    fn member_ids(&self) -> &[StateId] {
        self.state().member_ids()
    }
}

impl From<NamedComposite> for CompositeState {
    fn from(named: NamedComposite) -> Self {
        named.state().clone()
    }
}

impl From<NamedComposite> for ThingState {
    fn from(named: NamedComposite) -> Self {
        ThingState::Composite(named.state().clone())
    }
}

impl<R: StateSet> BitOr<R> for NamedComposite {
    type Output = CompositeState;

    fn bitor(self, rhs: R) -> CompositeState {
        self.union(&rhs)
    }
}

impl std::fmt::Display for NamedComposite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
