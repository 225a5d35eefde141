//! 事件映射宏（tidings-macros）
//!
//! `#[event_map]` 把一个枚举声明为封闭的事件映射：
//! 每个变体对应一个 (事件名, 载荷类型) 对。
//!
mod attrs;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Fields, Item, ItemEnum, Type, parse_macro_input, spanned::Spanned};

/// 事件映射宏
///
/// 仅支持形如：
/// ```ignore
/// #[event_map]
/// pub enum UiEvent {
///     #[event(name = "click")]
///     Click(ClickAt),
///     Ready,
///     #[event(marker = crate::shared::Resize)]
///     Resize(Size),
/// }
/// ```
/// 的单字段元组变体或单元变体（载荷为 `()`）。对每个变体：
/// - 生成同名零大小标记类型并实现 `::tidings_core::Event`；
///   事件名默认为 `Enum.Variant`，可用 `#[event(name = "...")]` 覆写；
/// - 若指定 `#[event(marker = path)]` 则复用已有标记类型，不再生成，
///   用于在新的映射中扩展已有事件；
/// - 为标记类型实现 `::tidings_core::EventOf<Enum>`。
///
/// 最后为枚举实现 `::tidings_core::EventMap`，支持以枚举值整体发射。
#[proc_macro_attribute]
pub fn event_map(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::TokenStream::from(attr).span(),
            "#[event_map] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as Item);
    let enum_item = match input {
        Item::Enum(e) => e,
        other => {
            return syn::Error::new(other.span(), "#[event_map] can only be used on enum types")
                .to_compile_error()
                .into();
        }
    };

    match expand(enum_item) {
        Ok(out) => out.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct MappedVariant {
    ident: syn::Ident,
    payload: Option<Type>,
    marker: syn::Path,
    generated: Option<proc_macro2::TokenStream>,
}

fn expand(mut enum_item: ItemEnum) -> syn::Result<proc_macro2::TokenStream> {
    if !enum_item.generics.params.is_empty() {
        return Err(syn::Error::new(
            enum_item.generics.span(),
            "#[event_map] does not support generic enums",
        ));
    }
    if enum_item.variants.is_empty() {
        return Err(syn::Error::new(
            enum_item.ident.span(),
            "#[event_map] requires at least one variant",
        ));
    }

    let enum_ident = enum_item.ident.clone();
    let vis = enum_item.vis.clone();
    let mut mapped = Vec::with_capacity(enum_item.variants.len());

    for v in &mut enum_item.variants {
        let cfg = attrs::take_event_attrs(&mut v.attrs)?;

        let payload = match &v.fields {
            Fields::Unit => None,
            Fields::Unnamed(f) if f.unnamed.len() == 1 => Some(f.unnamed[0].ty.clone()),
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "#[event_map] supports only unit variants or single-field tuple variants, e.g., Variant(Payload)",
                ));
            }
        };
        if let Some((_, discriminant)) = &v.discriminant {
            return Err(syn::Error::new(
                discriminant.span(),
                "#[event_map] variants cannot have explicit discriminants",
            ));
        }

        let v_ident = v.ident.clone();
        let (marker, generated) = match cfg.marker {
            Some(path) => (path, None),
            None => {
                let marker_ident = format_ident!("{}", v_ident);
                let name = cfg.name.unwrap_or_else(|| {
                    syn::LitStr::new(&format!("{enum_ident}.{v_ident}"), v_ident.span())
                });
                let payload_ty = match &payload {
                    Some(ty) => quote! { #ty },
                    None => quote! { () },
                };
                let doc = format!("Event marker for [`{enum_ident}::{v_ident}`].");
                let tokens = quote! {
                    #[doc = #doc]
                    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                    #vis struct #marker_ident;

                    impl ::tidings_core::Event for #marker_ident {
                        const NAME: &'static str = #name;
                        type Payload = #payload_ty;
                    }
                };
                (syn::Path::from(marker_ident), Some(tokens))
            }
        };

        mapped.push(MappedVariant {
            ident: v_ident,
            payload,
            marker,
            generated,
        });
    }

    let markers = mapped.iter().filter_map(|m| m.generated.as_ref());

    let member_impls = mapped.iter().map(|m| {
        let marker = &m.marker;
        quote! { impl ::tidings_core::EventOf<#enum_ident> for #marker {} }
    });

    let key_arms = mapped.iter().map(|m| {
        let (v, marker) = (&m.ident, &m.marker);
        match m.payload {
            Some(_) => quote! { Self::#v(..) => ::tidings_core::EventKey::of::<#marker>() },
            None => quote! { Self::#v => ::tidings_core::EventKey::of::<#marker>() },
        }
    });

    let sync_arms = mapped.iter().map(|m| {
        let (v, marker) = (&m.ident, &m.marker);
        match m.payload {
            Some(_) => quote! {
                Self::#v(payload) => emitter
                    .emit_sync::<#marker>(payload)
                    .map(|out| out.map(Self::#v))
            },
            None => quote! {
                Self::#v => emitter
                    .emit_sync::<#marker>(())
                    .map(|out| out.map(|()| Self::#v))
            },
        }
    });

    let async_arms = mapped.iter().map(|m| {
        let (v, marker) = (&m.ident, &m.marker);
        match m.payload {
            Some(_) => quote! {
                Self::#v(payload) => emitter
                    .emit::<#marker>(payload)
                    .await
                    .map(|out| out.map(Self::#v))
            },
            None => quote! {
                Self::#v => emitter
                    .emit::<#marker>(())
                    .await
                    .map(|out| out.map(|()| Self::#v))
            },
        }
    });

    Ok(quote! {
        #enum_item

        #( #markers )*

        #( #member_impls )*

        impl ::tidings_core::EventMap for #enum_ident {
            fn key(&self) -> ::tidings_core::EventKey {
                match *self { #( #key_arms, )* }
            }

            fn emit_sync_on(
                self,
                emitter: &::tidings_core::Emitter<Self>,
            ) -> ::std::result::Result<::tidings_core::Emitted<Self>, ::tidings_core::EmitError> {
                match self { #( #sync_arms, )* }
            }

            fn emit_on(
                self,
                emitter: &::tidings_core::Emitter<Self>,
            ) -> ::tidings_core::BoxFuture<
                '_,
                ::std::result::Result<::tidings_core::Emitted<Self>, ::tidings_core::EmitError>,
            > {
                ::std::boxed::Box::pin(async move {
                    match self { #( #async_arms, )* }
                })
            }
        }
    })
}
