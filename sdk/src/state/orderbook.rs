//! Limit-order book attached to a pool.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::config::{pubkey_string, ProgramConfig};
use crate::constants::MAX_ORDERS;
use crate::error::Result;

use super::reader::{check_header, read_bool, read_i64, read_pubkey, read_u64, read_u8};
use super::AccountKind;

const ORDERS_OFFSET: usize = 80;
const ORDER_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// One 64-byte order slot.
///
/// Layout: `owner(32) price(8) amount(8) expiry(i64) order_type(1) active(1) _pad(6)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    #[serde(with = "pubkey_string")]
    pub owner:      Pubkey,
    /// Scaled 1e6.
    pub price:      u64,
    pub amount:     u64,
    pub expiry:     i64,
    /// 0 = buy, 1 = sell.
    pub order_type: u8,
    pub active:     bool,
}

impl Order {
    fn read(data: &[u8], offset: usize) -> Result<Self> {
        Ok(Self {
            owner:      read_pubkey(data, offset)?,
            price:      read_u64(data, offset + 32)?,
            amount:     read_u64(data, offset + 40)?,
            expiry:     read_i64(data, offset + 48)?,
            order_type: read_u8(data, offset + 56)?,
            active:     read_bool(data, offset + 57)?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expiry
    }

    pub fn side(&self) -> Option<OrderSide> {
        match self.order_type {
            0 => Some(OrderSide::Buy),
            1 => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

/// Decoded `Orderbook` account.
///
/// Layout:
/// ```text
/// disc(8) pool(32) authority(32) order_count(1) _pad(7) orders(64 × 64)   = 4176 bytes
/// ```
/// All 64 slots are decoded; `order_count` is reported as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderbookState {
    #[serde(with = "pubkey_string")]
    pub pool:        Pubkey,
    #[serde(with = "pubkey_string")]
    pub authority:   Pubkey,
    pub order_count: u8,
    pub orders:      Vec<Order>,
}

pub fn parse_orderbook(data: &[u8], config: &ProgramConfig) -> Result<OrderbookState> {
    let kind = AccountKind::Orderbook;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.orderbook)?;

    let orders = (0..MAX_ORDERS)
        .map(|i| Order::read(data, ORDERS_OFFSET + i * ORDER_LEN))
        .collect::<Result<Vec<_>>>()?;

    Ok(OrderbookState {
        pool:        read_pubkey(data, 8)?,
        authority:   read_pubkey(data, 40)?,
        order_count: read_u8(data, 72)?,
        orders,
    })
}

impl OrderbookState {
    pub fn active_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.is_active())
    }
}
