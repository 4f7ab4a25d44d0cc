//! The device type bridge
//!
//! Per-device names for the execution space, dispatch policies and views,
//! so generic code can name them uniformly for any [`Device`].

use crate::device::{DefaultDevice, Device};
use crate::policy::{RangePolicy, TeamMember, TeamPolicy};
use crate::space::ExecutionSpace;
use crate::view::{Unmanaged, View};
use std::marker::PhantomData;

pub type ExeSpace<D = DefaultDevice> = <D as Device>::ExeSpace;
pub type MemberType<D = DefaultDevice> = TeamMember<D>;

pub type View1d<S, D = DefaultDevice> = View<S, 1, D>;
pub type View2d<S, D = DefaultDevice> = View<S, 2, D>;
pub type View3d<S, D = DefaultDevice> = View<S, 3, D>;

pub type Uview1d<'a, S, D = DefaultDevice> = Unmanaged<'a, S, 1, D>;
pub type Uview2d<'a, S, D = DefaultDevice> = Unmanaged<'a, S, 2, D>;
pub type Uview3d<'a, S, D = DefaultDevice> = Unmanaged<'a, S, 3, D>;

/// Type family of a device, for code that receives the device indirectly.
pub trait DeviceTypes {
    type Device: Device;
    type ExeSpace: ExecutionSpace;
    type MemberType;
    type TeamPolicy;
    type RangePolicy;
    type View1d<S>;
    type View2d<S>;
    type View3d<S>;
    type Uview1d<'a, S: 'a>;
    type Uview2d<'a, S: 'a>;
    type Uview3d<'a, S: 'a>;
}

/// [`DeviceTypes`] for `D`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBridge<D: Device = DefaultDevice>(PhantomData<D>);

impl<D: Device> DeviceTypes for TypeBridge<D> {
    type Device = D;
    type ExeSpace = D::ExeSpace;
    type MemberType = MemberType<D>;
    type TeamPolicy = TeamPolicy<D>;
    type RangePolicy = RangePolicy<D>;
    type View1d<S> = View1d<S, D>;
    type View2d<S> = View2d<S, D>;
    type View3d<S> = View3d<S, D>;
    type Uview1d<'a, S: 'a> = Uview1d<'a, S, D>;
    type Uview2d<'a, S: 'a> = Uview2d<'a, S, D>;
    type Uview3d<'a, S: 'a> = Uview3d<'a, S, D>;
}
