//! Typed identifiers of input channels and fixed banks indexed by them.
//!
//! A bank can only be indexed by the identifier it was declared for, so a
//! switch index can never reach into the pot bank by mistake.

use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

pub const BUTTON_COUNT: usize = 10;
pub const SWITCH_COUNT: usize = 12;
pub const POT_COUNT: usize = 4;
pub const DIRECTION_COUNT: usize = 4;

/// Identifier of a channel within its bank.
pub trait Channel: Copy {
    const COUNT: usize;

    fn index(self) -> usize;

    /// Callers must keep `index` below `COUNT`.
    fn from_index(index: usize) -> Self;
}

macro_rules! channel_id {
    ( $(#[$meta:meta])* $name:ident, $count:expr ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(u8);

        impl $name {
            #[must_use]
            pub const fn new(index: usize) -> Option<Self> {
                if index < $count {
                    Some(Self(index as u8))
                } else {
                    None
                }
            }
        }

        impl Channel for $name {
            const COUNT: usize = $count;

            fn index(self) -> usize {
                self.0 as usize
            }

            fn from_index(index: usize) -> Self {
                debug_assert!(index < $count);
                Self(index as u8)
            }
        }
    };
}

channel_id!(
    /// One of the momentary buttons.
    ButtonId,
    BUTTON_COUNT
);

channel_id!(
    /// One of the latching switches.
    SwitchId,
    SWITCH_COUNT
);

channel_id!(
    /// One of the potentiometers.
    PotId,
    POT_COUNT
);

/// Direction of the joystick, each wired as its own digital channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Channel for Direction {
    const COUNT: usize = DIRECTION_COUNT;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Right,
        }
    }
}

/// Fixed set of `N` items, one per channel of type `C`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bank<C, T, const N: usize> {
    items: [T; N],
    channel: PhantomData<C>,
}

pub type Buttons<T> = Bank<ButtonId, T, BUTTON_COUNT>;
pub type Switches<T> = Bank<SwitchId, T, SWITCH_COUNT>;
pub type Pots<T> = Bank<PotId, T, POT_COUNT>;
pub type Directions<T> = Bank<Direction, T, DIRECTION_COUNT>;

impl<C: Channel, T, const N: usize> Bank<C, T, N> {
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self {
            items: core::array::from_fn(f),
            channel: PhantomData,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (C::from_index(i), item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (C, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (C::from_index(i), item))
    }

    pub fn values(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<C: Channel, T: Default, const N: usize> Default for Bank<C, T, N> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<C: Channel, T, const N: usize> From<[T; N]> for Bank<C, T, N> {
    fn from(items: [T; N]) -> Self {
        Self {
            items,
            channel: PhantomData,
        }
    }
}

impl<C: Channel, T, const N: usize> Index<C> for Bank<C, T, N> {
    type Output = T;

    fn index(&self, channel: C) -> &T {
        &self.items[channel.index()]
    }
}

impl<C: Channel, T, const N: usize> IndexMut<C> for Bank<C, T, N> {
    fn index_mut(&mut self, channel: C) -> &mut T {
        &mut self.items[channel.index()]
    }
}
